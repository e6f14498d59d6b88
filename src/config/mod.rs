pub mod schema;

pub use schema::{
    BrowserConfig, CollectorConfig, Config, Credentials, FormSelectors, Signals, TargetUrl,
    Viewport, WaitConfig,
};
