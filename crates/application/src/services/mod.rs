//! Application services - Use case implementations

mod datasource_service;
mod frame_builder;

pub use datasource_service::{
    DEFAULT_ERROR_MESSAGE, DataSourceService, QueryRequest, QueryResponse, TestResult, TestStatus,
};
pub use frame_builder::{FrameSpec, build_frame, frame_name};
