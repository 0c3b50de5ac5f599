/// Reduce a channel column name to a filesystem-safe token:
/// alphanumerics survive, everything else collapses to single
/// underscores. `I_131_(Bq/m3)` becomes `I_131_Bq_m3`.
pub fn sanitize_channel(channel: &str) -> String {
    let mut out = String::with_capacity(channel.len());
    let mut last_was_sep = true;

    for c in channel.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c);
            last_was_sep = false;
        } else if !last_was_sep {
            out.push('_');
            last_was_sep = true;
        }
    }

    out.trim_end_matches('_').to_string()
}
