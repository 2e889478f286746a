use std::{fmt, io::Write};

#[cfg(feature = "dev")]
use std::{fs::File, path::Path};

use super::{Level, Log};

pub struct SimpleLogger<W: Send + Sync>
where
    for<'a> &'a W: Write,
{
    target: W,
    prefix: &'static str,
}

impl<W: Send + Sync> Log for SimpleLogger<W>
where
    for<'a> &'a W: Write,
{
    fn log(&self, level: Level, args: &fmt::Arguments<'_>) {
        let _ = match level {
            Level::Error | Level::Warn | Level::Info => {
                writeln!(&self.target, "{}{}", self.prefix, args)
            }
            Level::Debug | Level::Trace => {
                writeln!(&self.target, "{}[{:?}] {}", self.prefix, level, args)
            }
        };
    }

    fn flush(&self) {
        let _ = (&self.target).flush();
    }
}

impl SimpleLogger<std::io::Stderr> {
    pub fn to_stderr(prefix: &'static str) -> SimpleLogger<std::io::Stderr> {
        SimpleLogger {
            target: std::io::stderr(),
            prefix,
        }
    }
}

#[cfg(feature = "dev")]
impl SimpleLogger<File> {
    pub fn to_file<P: AsRef<Path>>(name: P, prefix: &'static str) -> Result<Self, std::io::Error> {
        let target = std::fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(name)?;
        Ok(Self { target, prefix })
    }
}
