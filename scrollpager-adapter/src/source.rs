use futures::future::LocalBoxFuture;
use scrollpager::LoadDirection;

/// The host's page supply.
///
/// Both methods must accept `None` (empty window, initial load) and resolve to `Ok(None)` once
/// there is nothing more in that direction. Errors are handed back to whoever drives the
/// [`crate::Driver`]; retry policy belongs to the host.
///
/// The returned futures are `'static`: implementations clone whatever they need from the cursor.
pub trait PageSource<P> {
    type Error;

    /// The page before `first` (the current first page of the window).
    fn page_before(
        &self,
        first: Option<&P>,
    ) -> LocalBoxFuture<'static, Result<Option<P>, Self::Error>>;

    /// The page after `last` (the current last page of the window).
    fn page_after(
        &self,
        last: Option<&P>,
    ) -> LocalBoxFuture<'static, Result<Option<P>, Self::Error>>;

    fn fetch(
        &self,
        direction: LoadDirection,
        cursor: Option<&P>,
    ) -> LocalBoxFuture<'static, Result<Option<P>, Self::Error>> {
        match direction {
            LoadDirection::Before => self.page_before(cursor),
            LoadDirection::After => self.page_after(cursor),
        }
    }
}
