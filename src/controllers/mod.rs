pub mod envelope;
pub mod records;
pub mod root;
pub use envelope::ApiError;
pub use records::RecordController;
pub use root::{RootController, RouteDescriptor};
