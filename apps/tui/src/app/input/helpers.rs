/// Scroll step for `PgUp`/`PgDn`.
pub const PAGE_STEP: usize = 5;

/// Maps a digit key to a zero-based topic index (`1` is the first topic, `0` the tenth).
pub fn digit_index(ch: char) -> Option<usize> {
    let digit = usize::try_from(ch.to_digit(10)?).ok()?;
    Some(if digit == 0 { 9 } else { digit - 1 })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_map_to_topic_positions() {
        assert_eq!(digit_index('1'), Some(0));
        assert_eq!(digit_index('9'), Some(8));
        assert_eq!(digit_index('0'), Some(9));
        assert_eq!(digit_index('x'), None);
    }
}
