pub mod guard;

#[cfg(test)]
mod test {
    use crate::utils::guard::Guard;

    #[test]
    fn not_empty_accepts_value() {
        assert_eq!(Guard::not_empty("sftp.local", "host").unwrap(), "sftp.local");
    }

    #[test]
    fn not_empty_rejects_only_empty() {
        let err = Guard::not_empty("", "passphrase").unwrap_err();
        assert_eq!(err.argument(), "passphrase");
        assert_eq!(Guard::not_empty("   ", "passphrase").unwrap(), "   ");
    }

    #[test]
    fn not_blank_rejects_empty_and_whitespace() {
        let err = Guard::not_blank("", "host").unwrap_err();
        assert_eq!(err.argument(), "host");
        assert!(Guard::not_blank("   ", "username").is_err());
        assert_eq!(Guard::not_blank(" sftp.local", "host").unwrap(), " sftp.local");
    }
}
