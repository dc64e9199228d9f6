//! # sysrev-core
//!
//! Core types shared across the Sysrev mirror crates:
//! - Wire entities for projects, labels, articles, judgments and article detail
//! - The label-value transformer used by label submission
//! - Opaque serialization helpers for heterogeneous JSON fields
//! - Cross-cutting error types

pub mod entities;
pub mod errors;
pub mod label;
pub mod opaque;

pub use entities::{
    Article, ArticleDetail, ArticleDetailBody, ArticleId, ArticleLabel, Label, Project,
    ProjectId, ProjectInfo, ProjectStats,
};
pub use errors::{CoreError, LabelError};
pub use label::{LabelType, LabelValue, transform_label};
