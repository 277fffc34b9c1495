//! Image source port for enumerating images to analyze.

use crate::domain::ImageRef;

/// Port for listing the images of a batch.
pub trait ImageSource: Send + Sync {
    /// Returns an iterator over the images from this source, in batch order.
    fn images(&self) -> Box<dyn Iterator<Item = ImageRef> + Send + '_>;

    /// Returns the total number of images, if known.
    fn count_hint(&self) -> Option<usize>;
}
