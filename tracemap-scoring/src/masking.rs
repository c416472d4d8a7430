//! Identifier masking applied before an address leaves the process

/// Mask an email address for inclusion in an outbound prompt.
///
/// The first character before the `@` is kept and every following character
/// up to the last `@` becomes `*`. Input without an `@`, or with nothing in
/// front of it, is returned unchanged.
pub fn mask_email(email: &str) -> String {
    let Some(at) = email.rfind('@') else {
        return email.to_string();
    };

    let (local, rest) = email.split_at(at);
    let mut chars = local.chars();
    let Some(first) = chars.next() else {
        return email.to_string();
    };

    let hidden = chars.count();
    let mut masked = String::with_capacity(email.len());
    masked.push(first);
    masked.extend(std::iter::repeat_n('*', hidden));
    masked.push_str(rest);
    masked
}
