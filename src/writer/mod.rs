//! Output destinations for loggers

pub mod console;
pub mod destination;
pub mod memory;
pub mod rotating_file;

pub use console::{new_stderr_writer, new_stdout_writer};
pub use destination::Destination;
pub use memory::MemoryWriter;
pub use rotating_file::{
    must_new_rotating_file_writer, new_rotating_file_writer, RotatingFileConfig,
    RotatingFileWriter,
};
