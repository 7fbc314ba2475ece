//! Dialect placeholder formatting.
//!
//! Builders emit `?` for every bound argument. The formatter rewrites them
//! into the target dialect once the whole statement is assembled, so
//! fragments can be composed without tracking argument positions.

/// Placeholder style of the target database.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaceholderFormat {
    /// `?` placeholders, left untouched
    Question,
    /// PostgreSQL `$1, $2, ...` placeholders
    #[default]
    Dollar,
}

impl PlaceholderFormat {
    /// Rewrite `?` placeholders of `sql`.
    ///
    /// `??` is an escaped literal question mark. Placeholders inside single
    /// quoted literals and double quoted identifiers are left alone.
    pub fn format(&self, sql: &str) -> String {
        let mut out = String::with_capacity(sql.len() + 8);
        let mut position = 0usize;
        let mut chars = sql.chars().peekable();
        let mut quote: Option<char> = None;

        while let Some(c) = chars.next() {
            if let Some(q) = quote {
                out.push(c);
                if c == q {
                    quote = None;
                }
                continue;
            }

            match c {
                '\'' | '"' => {
                    quote = Some(c);
                    out.push(c);
                }
                '?' if chars.peek() == Some(&'?') => {
                    chars.next();
                    out.push('?');
                }
                '?' => match self {
                    Self::Question => out.push('?'),
                    Self::Dollar => {
                        position += 1;
                        out.push('$');
                        out.push_str(&position.to_string());
                    }
                },
                _ => out.push(c),
            }
        }

        out
    }
}

/// Count the placeholders a statement expects.
pub fn count_placeholders(sql: &str) -> usize {
    let mut count = 0;
    let mut chars = sql.chars().peekable();
    let mut quote: Option<char> = None;
    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' => quote = Some(c),
            '?' if chars.peek() == Some(&'?') => {
                chars.next();
            }
            '?' => count += 1,
            _ => {}
        }
    }
    count
}
