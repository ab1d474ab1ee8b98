use crate::PageKey;

/// An opaque unit of content held by a [`crate::PageWindow`].
///
/// The engine never looks inside a page. It only needs a stable identity; heights are reported
/// separately once the rendering layer has laid the page out.
pub trait Page {
    type Id: PageKey;

    fn id(&self) -> Self::Id;
}
