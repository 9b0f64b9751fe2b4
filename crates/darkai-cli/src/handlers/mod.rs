//! One module per subcommand.

pub mod ask;
pub mod check_config;
pub mod imagine;
pub mod paths;
pub mod serve;
pub mod speak;
