/// Drop entries equal to the immediately preceding retained entry.
///
/// Only *consecutive* repeats are removed: `["/a", "/a", "/b", "/a"]` becomes
/// `["/a", "/b", "/a"]`. Relative order of the retained entries is unchanged.
pub fn dedupe_consecutive<T: PartialEq>(paths: Vec<T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(paths.len());
    for path in paths {
        if out.last() == Some(&path) {
            continue;
        }
        out.push(path);
    }
    out
}
