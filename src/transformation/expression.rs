//! User expression normalisation
//!
//! Conditions and expression-capable values may be written in a readable
//! form (`initial_width > 100 && page_count >= 2`). The service only accepts
//! the compact form (`iw_gt_100_and_pc_gte_2`), so readable operators and
//! predefined variable names are replaced by their short codes.

/// Operator tokens and their short codes
const OPERATORS: &[(&str, &str)] = &[
    ("=", "eq"),
    ("!=", "ne"),
    ("<", "lt"),
    (">", "gt"),
    ("<=", "lte"),
    (">=", "gte"),
    ("&&", "and"),
    ("||", "or"),
    ("*", "mul"),
    ("/", "div"),
    ("+", "add"),
    ("-", "sub"),
    ("^", "pow"),
];

/// Predefined variable names and their short codes
const PREDEFINED_VARIABLES: &[(&str, &str)] = &[
    ("width", "w"),
    ("height", "h"),
    ("initial_width", "iw"),
    ("initial_height", "ih"),
    ("aspect_ratio", "ar"),
    ("initial_aspect_ratio", "iar"),
    ("trimmed_aspect_ratio", "tar"),
    ("page_count", "pc"),
    ("current_page", "cp"),
    ("face_count", "fc"),
    ("illustration_score", "ils"),
    ("page_x", "px"),
    ("page_y", "py"),
    ("duration", "du"),
    ("initial_duration", "idu"),
    ("context", "ctx"),
    ("tags", "tags"),
];

/// Longest predefined variable name, in `_`-separated words
const MAX_VARIABLE_WORDS: usize = 3;

fn lookup(table: &[(&str, &'static str)], token: &str) -> Option<&'static str> {
    table
        .iter()
        .find(|(long, _)| *long == token)
        .map(|(_, short)| *short)
}

/// Normalise an expression to the service's compact form.
///
/// Runs of spaces and underscores collapse to a single `_`. A value wrapped
/// in `!…!` is a string literal and is returned untouched. Tokens starting
/// with `$` are user variables and are never rewritten. Normalising an
/// already-normalised expression is a no-op.
pub fn normalize_expression(expression: &str) -> String {
    if is_string_literal(expression) {
        return expression.to_string();
    }

    let tokens: Vec<&str> = expression
        .split(|c: char| c == ' ' || c == '_')
        .filter(|t| !t.is_empty())
        .collect();

    let mut out: Vec<String> = Vec::with_capacity(tokens.len());
    let mut i = 0;
    'tokens: while i < tokens.len() {
        if !tokens[i].starts_with('$') {
            // longest predefined variable first (initial_aspect_ratio before aspect_ratio)
            for words in (1..=MAX_VARIABLE_WORDS).rev() {
                if i + words > tokens.len() {
                    continue;
                }
                let candidate = tokens[i..i + words].join("_");
                if let Some(short) = lookup(PREDEFINED_VARIABLES, &candidate) {
                    out.push(short.to_string());
                    i += words;
                    continue 'tokens;
                }
            }
            if let Some(short) = lookup(OPERATORS, tokens[i]) {
                out.push(short.to_string());
                i += 1;
                continue;
            }
        }
        out.push(tokens[i].to_string());
        i += 1;
    }

    out.join("_")
}

fn is_string_literal(expression: &str) -> bool {
    expression.len() >= 2 && expression.starts_with('!') && expression.ends_with('!')
}
