//! Device media library port (avatar selection)

use async_trait::async_trait;

use super::repositories::RepoResult;

/// Options passed to the system image picker
#[derive(Debug, Clone, PartialEq)]
pub struct ImagePickerOptions {
    pub allows_editing: bool,
    /// Crop aspect ratio (width, height)
    pub aspect: (u32, u32),
    /// Compression quality in `0.0..=1.0`
    pub quality: f32,
}

impl ImagePickerOptions {
    /// Square crop used for avatars
    pub fn avatar() -> Self {
        Self {
            allows_editing: true,
            aspect: (1, 1),
            quality: 0.7,
        }
    }
}

impl Default for ImagePickerOptions {
    fn default() -> Self {
        Self::avatar()
    }
}

#[async_trait]
pub trait MediaLibrary: Send + Sync {
    /// Ask for gallery access; `false` when the user refuses
    async fn request_permission(&self) -> bool;

    /// Let the user pick an image; `None` when the picker is cancelled
    async fn pick_image(&self, options: &ImagePickerOptions) -> RepoResult<Option<String>>;
}
