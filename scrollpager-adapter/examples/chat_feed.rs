use std::collections::HashMap;

use futures::executor::block_on;
use futures::future::{self, FutureExt, LocalBoxFuture};
use scrollpager::{LoadDirection, MemoryViewport, Page, Settings, Visibility};
use scrollpager_adapter::{Driver, PageSource, PageView};

// Example: a bottom-up chat history. The list opens on the newest page and is anchored to the
// end once laid out. Each frame the trailing sentinel scrolls into view and the page it loads
// pushes it back out, so one older page arrives per frame; the window keeps at most four pages
// mounted.

#[derive(Clone, Debug)]
struct Messages {
    seq: u32,
    count: u32,
}

impl Page for Messages {
    type Id = u32;

    fn id(&self) -> u32 {
        self.seq
    }
}

/// Ten pages of history; page 9 is the newest.
struct History;

impl History {
    fn page(seq: u32) -> Messages {
        Messages {
            seq,
            count: 5 + seq % 3,
        }
    }
}

impl PageSource<Messages> for History {
    type Error = std::convert::Infallible;

    fn page_before(
        &self,
        first: Option<&Messages>,
    ) -> LocalBoxFuture<'static, Result<Option<Messages>, Self::Error>> {
        let page = match first {
            None => Some(Self::page(9)),
            Some(m) => m.seq.checked_sub(1).map(Self::page),
        };
        future::ready(Ok(page)).boxed_local()
    }

    fn page_after(
        &self,
        last: Option<&Messages>,
    ) -> LocalBoxFuture<'static, Result<Option<Messages>, Self::Error>> {
        // Nothing is newer than the newest page.
        let page = if last.is_none() { Some(Self::page(9)) } else { None };
        future::ready(Ok(page)).boxed_local()
    }
}

/// Renders each message as one 20px row.
#[derive(Default)]
struct Rows {
    heights: HashMap<u32, u32>,
}

impl PageView<Messages> for Rows {
    fn mount(&mut self, page: &Messages, at: LoadDirection) {
        println!("mount page {} ({at:?})", page.seq);
        self.heights.insert(page.seq, page.count * 20);
    }

    fn unmount(&mut self, id: &u32) {
        println!("unmount page {id}");
        self.heights.remove(id);
    }

    fn measure(&self, id: &u32) -> Option<u32> {
        self.heights.get(id).copied()
    }
}

fn main() {
    let settings = Settings::default()
        .with_start_bottom_up(true)
        .with_max_page_buffer(4);
    let mut driver = Driver::new(settings, History, Rows::default(), MemoryViewport::new(200, 0))
        .expect("valid settings");

    for _ in 0..6 {
        driver.on_visibility(Visibility::trailing(1.0));
        driver.on_visibility(Visibility::trailing(0.0));
        block_on(driver.drain()).expect("history never fails");

        let content = driver.view().heights.values().map(|&h| u64::from(h)).sum();
        driver.viewport_mut().extent.content = content;
        let report = driver.on_layout_committed();
        println!(
            "window={:?} off={} (delta {}, anchored {})",
            driver.controller().window().ids().collect::<Vec<_>>(),
            driver.viewport().offset,
            report.delta,
            report.anchored,
        );
    }
}
