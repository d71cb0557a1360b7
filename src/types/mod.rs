// ABOUTME: Validated domain types shared across the release pipeline.
// ABOUTME: Service names and image references with tag and digest forms.

mod image_ref;
mod service_name;

pub use image_ref::{ImageRef, ImageRepo, ParseImageRepoError};
pub use service_name::{ServiceName, ServiceNameError};
