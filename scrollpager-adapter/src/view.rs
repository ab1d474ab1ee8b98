use scrollpager::{LoadDirection, Page};

/// The host's rendering capability.
///
/// The driver tells the view which pages enter and leave the window; the view reports settled
/// heights once its layout pass has run. `measure` must return `None` until layout is committed
/// for that page.
pub trait PageView<P: Page> {
    /// Renders `page` on the `at` end of the list.
    fn mount(&mut self, page: &P, at: LoadDirection);

    fn unmount(&mut self, id: &P::Id);

    fn measure(&self, id: &P::Id) -> Option<u32>;
}
