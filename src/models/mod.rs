pub mod design_report;
pub mod project_description;

pub use design_report::{DesignReport, Fragment, FragmentKind, Stage};
pub use project_description::{ProjectDescription, ProjectField, EMPTY_FIELD_PLACEHOLDER};
