use triform_build::OtherFile;

/// Parse an `--other` value of the form `FILE[:LINES][:noexport]`.
///
/// `LINES` is the number of leading lines to drop. `noexport` strips every
/// `export` keyword from the file. Both suffixes are optional and may appear
/// in either order.
///
/// # Examples
///
/// Valid: `src/colors.ts`, `src/colors.ts:2`, `src/colors.ts:noexport`,
/// `src/colors.ts:2:noexport`
///
/// # Errors
///
/// Returns an error message for an empty path, a repeated suffix or a
/// suffix that is neither a number nor `noexport`.
pub fn parse_other(s: &str) -> Result<OtherFile, String> {
    let mut parts: Vec<&str> = s.split(':').collect();
    let mut lines = None;
    let mut remove_export = false;

    // Suffixes are peeled from the right so Windows drive letters survive.
    while parts.len() > 1 {
        let Some(last) = parts.last().copied() else {
            break;
        };
        if last.eq_ignore_ascii_case("noexport") {
            if remove_export {
                return Err(format!("'noexport' given twice in '{}'", s));
            }
            remove_export = true;
        } else if let Ok(n) = last.parse::<usize>() {
            if lines.is_some() {
                return Err(format!("Line count given twice in '{}'", s));
            }
            lines = Some(n);
        } else {
            break;
        }
        parts.pop();
    }

    let path = parts.join(":");
    if path.is_empty() {
        return Err(format!("Missing file path in '{}'", s));
    }

    let mut file = OtherFile::new(path).remove_export(remove_export);
    if let Some(n) = lines {
        file = file.lines(n);
    }
    Ok(file)
}
