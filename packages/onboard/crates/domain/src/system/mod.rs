pub mod platform;
pub mod probe;
pub mod snapshot;
pub mod version;

pub use platform::{Architecture, Platform, PlatformDetector, PlatformInfo};
pub use probe::EnvironmentProber;
pub use snapshot::{EnvironmentSnapshot, PackageManagerDetection, PackageManagerKind, ToolDetection};
pub use version::extract_version;
