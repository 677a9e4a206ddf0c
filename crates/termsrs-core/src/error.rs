// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;
use std::path::Path;
use std::path::PathBuf;

/// Errors raised while loading or writing back a deck file.
#[derive(Debug)]
pub enum DeckError {
    /// The `NewCards: <N>` header is missing or malformed.
    Config { path: PathBuf, message: String },
    /// A card row has the wrong shape or an unparseable field.
    MalformedCard {
        path: PathBuf,
        /// Zero-based line index within the file.
        line_num: usize,
        message: String,
    },
    /// The backing file could not be opened, read or replaced.
    Resource {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl DeckError {
    pub fn config(path: &Path, message: impl Into<String>) -> Self {
        DeckError::Config {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    pub fn malformed(path: &Path, line_num: usize, message: impl Into<String>) -> Self {
        DeckError::MalformedCard {
            path: path.to_path_buf(),
            line_num,
            message: message.into(),
        }
    }

    pub fn resource(path: &Path, source: std::io::Error) -> Self {
        DeckError::Resource {
            path: path.to_path_buf(),
            source,
        }
    }
}

impl Display for DeckError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DeckError::Config { path, message } => {
                write!(f, "{message} Location: {}:1", path.display())
            }
            DeckError::MalformedCard {
                path,
                line_num,
                message,
            } => write!(f, "{message} Location: {}:{}", path.display(), line_num + 1),
            DeckError::Resource { path, source } => {
                write!(f, "cannot access {}: {source}", path.display())
            }
        }
    }
}

impl Error for DeckError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DeckError::Resource { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct ErrorReport {
    message: String,
}

impl ErrorReport {
    pub fn new(msg: impl Into<String>) -> Self {
        ErrorReport {
            message: msg.into(),
        }
    }
}

impl From<std::io::Error> for ErrorReport {
    fn from(value: std::io::Error) -> Self {
        ErrorReport {
            message: format!("I/O error: {value}"),
        }
    }
}

impl From<DeckError> for ErrorReport {
    fn from(value: DeckError) -> Self {
        let kind = match value {
            DeckError::Config { .. } => "Config error",
            DeckError::MalformedCard { .. } => "Malformed card",
            DeckError::Resource { .. } => "Resource error",
        };
        ErrorReport {
            message: format!("{kind}: {value}"),
        }
    }
}

impl Display for ErrorReport {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "error: {}", self.message)
    }
}

impl Error for ErrorReport {}

pub type Fallible<T> = Result<T, ErrorReport>;

pub fn fail<T>(msg: impl Into<String>) -> Fallible<T> {
    Err(ErrorReport {
        message: msg.into(),
    })
}
