//! Lexical path normalization
//!
//! Rewrites a path fragment in place: leading separators and `./` are
//! dropped, runs of `/` collapse to one, `.` segments vanish and `..` pops the
//! previous segment. A `..` with nothing left to pop is absorbed, so the
//! result never refers above the start of the fragment.
//!
//! Only ASCII bytes are ever removed and every cut lands next to a `/` or `.`,
//! so the buffer stays valid UTF-8 and no reallocation happens.

/// Normalizes an entire fragment in place.
pub fn normalize(path: &mut String) {
    normalize_from(path, 0);
}

/// Normalizes `path[start..]` in place, leaving `path[..start]` untouched.
///
/// `start` must sit on a char boundary (in practice it is always just past a
/// `/`).
pub fn normalize_from(path: &mut String, start: usize) {
    // path[start..out] is already normalized; it never ends with '/' unless
    // the loop has finished.
    let mut out = start;

    while out < path.len() {
        let slashes = path.as_bytes()[out..]
            .iter()
            .take_while(|&&b| b == b'/')
            .count();

        let sep = if out == start {
            path.replace_range(out..out + slashes, "");
            0
        } else {
            // Keep exactly one separator between the prefix and the next segment.
            if slashes > 1 {
                path.replace_range(out + 1..out + slashes, "");
            }
            1
        };

        let seg_start = out + sep;
        let seg_end = path.as_bytes()[seg_start..]
            .iter()
            .position(|&b| b == b'/')
            .map_or(path.len(), |i| seg_start + i);

        match &path[seg_start..seg_end] {
            // Trailing separator (or nothing at all) left.
            "" => break,
            "." => {
                path.replace_range(out..seg_end, "");
            }
            ".." => {
                let cut = path[start..out].rfind('/').map_or(start, |i| start + i);
                path.replace_range(cut..seg_end, "");
                out = cut;
            }
            _ => out = seg_end,
        }
    }
}
