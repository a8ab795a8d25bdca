//! Offset-based character masking

use keymask_core::{Error, Result};

/// Mask `target`, keeping `start_offset` leading and `end_offset` trailing
/// characters and replacing every character in between with `placeholder`.
///
/// Offsets count characters, not bytes. The output always has the same
/// number of characters as the input. Fails with [`Error::InvalidOffset`]
/// when the offsets together exceed the length of `target`; when they add up
/// to exactly the length, nothing is replaced.
pub fn mask(target: &str, start_offset: usize, end_offset: usize, placeholder: char) -> Result<String> {
    let length = target.chars().count();
    check(start_offset, end_offset, target, length)?;

    let end = length - end_offset;
    Ok(target
        .chars()
        .enumerate()
        .map(|(index, ch)| {
            if (start_offset..end).contains(&index) {
                placeholder
            } else {
                ch
            }
        })
        .collect())
}

fn check(start_offset: usize, end_offset: usize, target: &str, length: usize) -> Result<()> {
    if start_offset
        .checked_add(end_offset)
        .is_none_or(|covered| covered > length)
    {
        return Err(Error::InvalidOffset {
            start_offset,
            end_offset,
            target: target.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_phone() {
        assert_eq!(mask("13800138000", 3, 4, '*').unwrap(), "138****8000");
    }

    #[test]
    fn test_mask_keeps_prefix_suffix_and_length() {
        let target = "user@example.com";
        let masked = mask(target, 2, 3, '#').unwrap();

        assert_eq!(masked.chars().count(), target.chars().count());
        assert!(masked.starts_with("us"));
        assert!(masked.ends_with("com"));
        assert!(masked[2..masked.len() - 3].chars().all(|c| c == '#'));
    }

    #[test]
    fn test_mask_zero_offsets_masks_everything() {
        assert_eq!(mask("secret", 0, 0, '*').unwrap(), "******");
    }

    #[test]
    fn test_mask_offsets_equal_length_is_noop() {
        assert_eq!(mask("abcdef", 2, 4, '*').unwrap(), "abcdef");
        assert_eq!(mask("abcdef", 6, 0, '*').unwrap(), "abcdef");
    }

    #[test]
    fn test_mask_is_idempotent() {
        let once = mask("13800138000", 3, 4, '*').unwrap();
        let twice = mask(&once, 3, 4, '*').unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_mask_counts_characters_not_bytes() {
        assert_eq!(mask("张三丰先生", 1, 1, '*').unwrap(), "张***生");
        assert_eq!(mask("héllo", 1, 1, 'x').unwrap(), "hxxxo");
    }

    #[test]
    fn test_mask_offsets_too_long() {
        let err = mask("abc", 2, 2, '*').unwrap_err();
        match err {
            Error::InvalidOffset {
                start_offset,
                end_offset,
                target,
            } => {
                assert_eq!(start_offset, 2);
                assert_eq!(end_offset, 2);
                assert_eq!(target, "abc");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_mask_offsets_overflow() {
        assert!(matches!(
            mask("abc", usize::MAX, 1, '*'),
            Err(Error::InvalidOffset { .. })
        ));
    }

    #[test]
    fn test_mask_empty_string_with_zero_offsets() {
        assert_eq!(mask("", 0, 0, '*').unwrap(), "");
        assert!(mask("", 1, 0, '*').is_err());
    }
}
