use std::collections::HashMap;

/// Value of one `--name` option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Str(String),
    Flag,
}

/// Options following the command name, keyed by name without the `--` prefix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedArgs {
    values: HashMap<String, ArgValue>,
}

impl ParsedArgs {
    /// Scans `--name [value]` pairs left to right. A value is taken only when the
    /// next token exists and does not start with `--`; tokens outside a pair are dropped.
    pub fn parse<S: AsRef<str>>(tokens: &[S]) -> Self {
        let mut values = HashMap::new();
        let mut i = 0;

        while i < tokens.len() {
            let token: &str = tokens[i].as_ref();
            if let Some(name) = token.strip_prefix("--") {
                let next: Option<&str> = tokens.get(i + 1).map(|t| t.as_ref());
                match next {
                    Some(next) if !next.starts_with("--") => {
                        values.insert(name.to_string(), ArgValue::Str(next.to_string()));
                        i += 1;
                    }
                    _ => {
                        values.insert(name.to_string(), ArgValue::Flag);
                    }
                }
            }
            i += 1;
        }

        Self { values }
    }

    pub fn get(&self, name: &str) -> Option<&ArgValue> {
        self.values.get(name)
    }

    /// String value only; a bare flag yields `None`.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.values.get(name) {
            Some(ArgValue::Str(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn non_empty(&self, name: &str) -> Option<&str> {
        self.get_str(name).filter(|s| !s.is_empty())
    }

    /// First of `names` carrying a non-empty string value.
    pub fn first_non_empty(&self, names: &[&str]) -> Option<&str> {
        names.iter().find_map(|name| self.non_empty(name))
    }

    pub fn flag(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
