//! Metadata extraction from `aapt2 dump badging` output.
//!
//! Only the first line is read. It looks like
//!
//! ```text
//! package: name='com.example.app' versionCode='12' versionName='1.0' split='config.en'
//! ```
//!
//! and is split with shell quoting rules before the `key=value` tokens are
//! inspected.

use crate::error::{ImportError, MetadataField, Result};
use crate::model::{PackageIdentity, PackageMetadata};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Quote {
    None,
    Single,
    Double,
}

/// Split a line into tokens with POSIX shell quoting.
///
/// Quoted and unquoted segments glue together, so `name='x y'` yields the
/// single token `name=x y`. Empty quotes produce an empty token.
pub fn tokenize(line: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote = Quote::None;
    let mut chars = line.chars();

    while let Some(c) = chars.next() {
        match quote {
            Quote::Single => {
                if c == '\'' {
                    quote = Quote::None;
                } else {
                    current.push(c);
                }
            }
            Quote::Double => match c {
                '"' => quote = Quote::None,
                '\\' => match chars.next() {
                    Some(next @ ('"' | '\\')) => current.push(next),
                    Some(next) => {
                        current.push('\\');
                        current.push(next);
                    }
                    None => return Err(malformed("no closing quotation")),
                },
                _ => current.push(c),
            },
            Quote::None => match c {
                '\'' => {
                    quote = Quote::Single;
                    in_token = true;
                }
                '"' => {
                    quote = Quote::Double;
                    in_token = true;
                }
                '\\' => {
                    let next = chars
                        .next()
                        .ok_or_else(|| malformed("no escaped character"))?;
                    current.push(next);
                    in_token = true;
                }
                ' ' | '\t' | '\r' | '\n' => {
                    if in_token {
                        tokens.push(std::mem::take(&mut current));
                        in_token = false;
                    }
                }
                _ => {
                    current.push(c);
                    in_token = true;
                }
            },
        }
    }

    if quote != Quote::None {
        return Err(malformed("no closing quotation"));
    }
    if in_token {
        tokens.push(current);
    }

    Ok(tokens)
}

fn malformed(message: &str) -> ImportError {
    ImportError::MalformedBadging(message.to_string())
}

/// Extract package identity and split status from badging text.
pub fn extract_metadata(badging: &str) -> Result<PackageMetadata> {
    let first_line = badging.lines().next().unwrap_or("");

    let mut name = None;
    let mut version_code = None;
    let mut version_name = None;
    let mut split_name = None;
    let mut is_split = false;

    for token in tokenize(first_line)? {
        let mut parts = token.split('=');
        let key = parts.next().unwrap_or_default();
        let value = parts.next().filter(|v| !v.is_empty()).map(str::to_string);

        if token.starts_with("split") {
            is_split = true;
            if key == "split" {
                split_name = value;
            }
            continue;
        }

        match key {
            "name" => name = value,
            "versionCode" => version_code = value,
            "versionName" => version_name = value,
            _ => {}
        }
    }

    let name = name.ok_or(ImportError::MissingMetadata(MetadataField::Name))?;
    let version_code =
        version_code.ok_or(ImportError::MissingMetadata(MetadataField::VersionCode))?;

    Ok(PackageMetadata {
        identity: PackageIdentity::new(name, version_code)?,
        is_split,
        version_name,
        split_name,
    })
}
