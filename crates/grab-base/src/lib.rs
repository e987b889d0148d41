pub mod logging;
pub mod tensor;

pub use logging::{
    FileLogger, StdoutLogger, default_level, init_file_logger, init_stdout_logger,
};
pub use tensor::{Tensor, TensorError};

// Re-export log crate so downstream crates can use grab_base::log::*
pub use log;
