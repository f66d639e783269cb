use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Path template has {template_len} field names but the key has {segment_count} segments")]
pub struct TemplateMismatch {
    pub template_len: usize,
    pub segment_count: usize,
}

/// Field names mapped positionally onto the `/`-delimited segments of an object key.
///
/// A key may carry one segment more than the template: the trailing object
/// name is not described by the template, which then lines up with the
/// key's directory segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathFieldTemplate {
    names: Vec<String>,
}

impl PathFieldTemplate {
    /// Parse a `/`-delimited template. Blank input means no template.
    pub fn parse(template: &str) -> Option<Self> {
        if template.trim().is_empty() {
            return None;
        }

        Some(Self {
            names: template.split('/').map(str::to_string).collect(),
        })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Pair every template name with its key segment.
    pub fn apply<'k>(&self, key: &'k str) -> Result<Vec<(&str, &'k str)>, TemplateMismatch> {
        let segments: Vec<&str> = key.split('/').collect();
        let template_len = self.names.len();

        if segments.len() != template_len && segments.len() != template_len + 1 {
            return Err(TemplateMismatch {
                template_len,
                segment_count: segments.len(),
            });
        }

        Ok(self
            .names
            .iter()
            .map(String::as_str)
            .zip(segments)
            .collect())
    }
}
