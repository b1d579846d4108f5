//! Shared macros for the backend crate.

/// Generate a `fmt::Debug` implementation that redacts sensitive fields.
///
/// Three field kinds are supported, specified as a keyword before the field name:
///
/// - `show field_name` - prints the field value normally
/// - `redact field_name` - prints `"[REDACTED]"` instead of the value
/// - `redact_option field_name` - prints `Some("[REDACTED]")` or `None`
///
/// # Example
///
/// ```ignore
/// redacted_debug!(Config {
///     show bind_address,
///     redact database_url,
///     redact jwt_secret,
/// });
/// ```
macro_rules! redacted_debug {
    ($name:ident { $( $kind:ident $field:ident ),* $(,)? }) => {
        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                let mut s = f.debug_struct(stringify!($name));
                $( redacted_debug!(@add_field s, self, $kind, $field); )*
                s.finish_non_exhaustive()
            }
        }
    };
    (@add_field $s:ident, $self:ident, show, $field:ident) => {
        $s.field(stringify!($field), &$self.$field);
    };
    (@add_field $s:ident, $self:ident, redact, $field:ident) => {
        $s.field(stringify!($field), &"[REDACTED]");
    };
    (@add_field $s:ident, $self:ident, redact_option, $field:ident) => {
        $s.field(stringify!($field), &$self.$field.as_ref().map(|_| "[REDACTED]"));
    };
}

#[cfg(test)]
mod tests {
    #[allow(dead_code)]
    struct Credentials {
        pub endpoint: String,
        pub signing_secret: String,
        pub service_key: Option<String>,
    }

    redacted_debug!(Credentials {
        show endpoint,
        redact signing_secret,
        redact_option service_key,
    });

    #[test]
    fn test_redacted_debug_hides_secrets() {
        let c = Credentials {
            endpoint: "db.internal:5432".to_string(),
            signing_secret: "hmac-signing-secret".to_string(),
            service_key: Some("service-role-key".to_string()),
        };
        let output = format!("{:?}", c);
        assert!(output.contains("db.internal:5432"));
        assert!(!output.contains("hmac-signing-secret"));
        assert!(!output.contains("service-role-key"));
        assert!(output.contains("[REDACTED]"));
    }

    #[test]
    fn test_redacted_debug_option_none() {
        let c = Credentials {
            endpoint: "localhost".to_string(),
            signing_secret: "secret".to_string(),
            service_key: None,
        };
        let output = format!("{:?}", c);
        assert!(output.contains("None"));
        assert!(!output.contains("secret\""));
    }
}
