// Example: sentinel-driven loading with scroll compensation on prepend.
use scrollpager::{
    LoadDirection, MemoryViewport, MergeOutcome, Page, PaginationController, Settings, Visibility,
};

#[derive(Clone, Debug)]
struct Chunk {
    id: i64,
    lines: u32,
}

impl Page for Chunk {
    type Id = i64;

    fn id(&self) -> i64 {
        self.id
    }
}

fn fetch(direction: LoadDirection, cursor: Option<&Chunk>) -> Option<Chunk> {
    let id = match (direction, cursor) {
        (_, None) => 0,
        (LoadDirection::Before, Some(c)) => c.id - 1,
        (LoadDirection::After, Some(c)) => c.id + 1,
    };
    (-3..=3).contains(&id).then(|| Chunk {
        id,
        lines: 10 + id.unsigned_abs() as u32,
    })
}

fn main() {
    let mut c = PaginationController::<Chunk>::new(Settings::default().with_max_page_buffer(4))
        .expect("valid settings");
    let mut vp = MemoryViewport::new(20, 0);

    // Bring each sentinel into view once. A sentinel that stays visible keeps paging until
    // its end of the dataset is reached.
    for visibility in [Visibility::trailing(1.0), Visibility::leading(1.0)] {
        let mut next = c.on_visibility(visibility);
        while let Some(req) = next.take() {
            let page = fetch(req.direction, req.cursor.as_ref());
            let lines = page.as_ref().map(|p| p.lines);
            match c.resolve(req.ticket, page).expect("no duplicate pages") {
                MergeOutcome::Merged {
                    inserted,
                    evicted,
                    next: follow_up,
                    ..
                } => {
                    if let Some(lines) = lines {
                        c.measure(&inserted, lines);
                    }
                    vp.extent.content = c.window().measured_height();
                    let report = c.on_layout_committed(&mut vp);
                    println!(
                        "{:?} +{inserted} evicted={:?} off={} (delta {})",
                        req.direction,
                        evicted.map(|e| e.page.id),
                        vp.offset,
                        report.delta
                    );
                    next = follow_up;
                }
                MergeOutcome::Exhausted(direction) => println!("{direction:?}: no more pages"),
                MergeOutcome::Discarded => {}
            }
        }
        c.on_visibility(Visibility::new(visibility.edge, 0.0));
    }

    println!("window: {:?}", c.window().ids().collect::<Vec<_>>());
}
