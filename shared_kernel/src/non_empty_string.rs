/// Declares a `String` newtype that can only hold a non-blank value.
///
/// Surrounding whitespace is trimmed on construction, the trimmed value is what
/// gets stored.
#[macro_export]
macro_rules! non_empty_string {
    ($TypeName: ident) => {
        #[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, serde::Serialize)]
        #[serde(transparent)]
        pub struct $TypeName(String);

        impl $TypeName {
            pub fn inner(&self) -> String {
                self.0.clone()
            }
        }

        impl PartialEq<str> for $TypeName {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }

        impl std::fmt::Display for $TypeName {
            fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }

        impl AsRef<str> for $TypeName {
            fn as_ref(&self) -> &str {
                self.0.as_ref()
            }
        }

        impl std::borrow::Borrow<str> for $TypeName {
            fn borrow(&self) -> &str {
                &self.0
            }
        }

        impl TryFrom<String> for $TypeName {
            type Error = String;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return Err("value cannot be empty".to_string());
                }
                Ok($TypeName(trimmed.to_owned()))
            }
        }

        impl TryFrom<&str> for $TypeName {
            type Error = String;

            fn try_from(value: &str) -> Result<Self, Self::Error> {
                $TypeName::try_from(value.to_owned())
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    crate::non_empty_string!(SampleName);

    #[rstest]
    #[case("Lagos", "Lagos")]
    #[case("  Abuja ", "Abuja")]
    #[case("\tPort Harcourt\n", "Port Harcourt")]
    #[case("Ibadan  North", "Ibadan  North")]
    fn test_that_values_are_trimmed(#[case] input: &str, #[case] expected: &str) {
        let name = SampleName::try_from(input).unwrap();
        assert_eq!(name.as_ref(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("\n\t")]
    fn test_that_blank_values_are_rejected(#[case] input: &str) {
        assert!(SampleName::try_from(input.to_string()).is_err());
    }

    #[test]
    fn test_that_names_display_as_plain_strings() {
        let name = SampleName::try_from("Kano").unwrap();
        assert_eq!(name.to_string(), "Kano");
        assert!(name == *"Kano");
    }
}
