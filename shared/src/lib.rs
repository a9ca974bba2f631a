pub mod models;

pub use models::{
    FractalItem, FractalList, PanelUser, Server, ServerLimits, ServerMeta, ServerResponse,
    ServerStatus,
};
