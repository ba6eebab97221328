use crate::error::CodecError;
use std::fmt::Display;
use std::marker::PhantomData;
use std::str::FromStr;

/// Conversion between a value of `T` and its command line text.
///
/// Codecs are pure: they never see the parser or the argument they serve.
/// For every value `v` produced by `value_from_text`, `value_from_text(&text_from_value(&v))` yields `v` again.
pub trait Codec<T> {
    /// The type label shown in help, ex: `integer`.
    fn name(&self) -> &str;

    /// Decode the text, describing the expected form on failure.
    fn value_from_text(&self, text: &str) -> Result<T, CodecError>;

    /// Encode the value.
    fn text_from_value(&self, value: &T) -> String;

    /// Whether `text_from_value` can write the value.
    fn can_encode(&self, _value: &T) -> bool {
        true
    }
}

/// `true` or `false`, case insensitive.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolCodec;

impl Codec<bool> for BoolCodec {
    fn name(&self) -> &str {
        "boolean"
    }

    fn value_from_text(&self, text: &str) -> Result<bool, CodecError> {
        let trimmed = text.trim();

        if trimmed.eq_ignore_ascii_case("true") {
            Ok(true)
        } else if trimmed.eq_ignore_ascii_case("false") {
            Ok(false)
        } else {
            Err(CodecError(format!(
                "Expected 'true' or 'false', found '{text}'"
            )))
        }
    }

    fn text_from_value(&self, value: &bool) -> String {
        value.to_string()
    }
}

/// A signed 32 bit integer in plain decimal digits.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntCodec;

impl Codec<i32> for IntCodec {
    fn name(&self) -> &str {
        "integer"
    }

    fn value_from_text(&self, text: &str) -> Result<i32, CodecError> {
        text.trim()
            .parse::<i32>()
            .map_err(|_| CodecError(format!("Expected an integer, found '{text}'")))
    }

    fn text_from_value(&self, value: &i32) -> String {
        value.to_string()
    }
}

/// Text taken verbatim; the empty string is a valid value.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringCodec;

impl Codec<String> for StringCodec {
    fn name(&self) -> &str {
        "string"
    }

    fn value_from_text(&self, text: &str) -> Result<String, CodecError> {
        Ok(text.to_string())
    }

    fn text_from_value(&self, value: &String) -> String {
        value.clone()
    }
}

/// A fixed set of named members, matched exactly (case sensitive).
#[derive(Debug, Clone)]
pub struct EnumCodec<T> {
    name: String,
    members: Vec<(String, T)>,
}

impl<T: Clone + PartialEq> EnumCodec<T> {
    /// Create a codec for the type labelled `name` with the members `(text, value)`.
    pub fn new<'a>(
        name: impl Into<String>,
        members: impl IntoIterator<Item = (&'a str, T)>,
    ) -> Self {
        Self {
            name: name.into(),
            members: members
                .into_iter()
                .map(|(text, value)| (text.to_string(), value))
                .collect(),
        }
    }
}

impl<T: Clone + PartialEq> Codec<T> for EnumCodec<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn value_from_text(&self, text: &str) -> Result<T, CodecError> {
        self.members
            .iter()
            .find(|(member, _)| member == text)
            .map(|(_, value)| value.clone())
            .ok_or_else(|| {
                let members: Vec<&str> = self.members.iter().map(|(m, _)| m.as_str()).collect();
                CodecError(format!(
                    "Expected one of [{}], found '{text}'",
                    members.join(", ")
                ))
            })
    }

    fn text_from_value(&self, value: &T) -> String {
        self.members
            .iter()
            .find(|(_, member)| member == value)
            .map(|(text, _)| text.clone())
            .unwrap_or_default()
    }

    fn can_encode(&self, value: &T) -> bool {
        self.members.iter().any(|(_, member)| member == value)
    }
}

/// Any type with [`FromStr`] and [`Display`] implementations which round trip.
pub struct FromStrCodec<T> {
    name: String,
    _type: PhantomData<T>,
}

impl<T> FromStrCodec<T> {
    /// Create a codec for the type labelled `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            _type: PhantomData,
        }
    }
}

impl<T: FromStr + Display> Codec<T> for FromStrCodec<T> {
    fn name(&self) -> &str {
        &self.name
    }

    fn value_from_text(&self, text: &str) -> Result<T, CodecError> {
        T::from_str(text)
            .map_err(|_| CodecError(format!("Expected a {}, found '{text}'", self.name)))
    }

    fn text_from_value(&self, value: &T) -> String {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{thread_rng, Rng};
    use rstest::rstest;

    #[derive(Debug, Clone, Copy, PartialEq)]
    enum Colour {
        Red,
        Green,
        Blue,
    }

    fn colour_codec() -> EnumCodec<Colour> {
        EnumCodec::new(
            "Colour",
            [
                ("Red", Colour::Red),
                ("Green", Colour::Green),
                ("Blue", Colour::Blue),
            ],
        )
    }

    #[rstest]
    #[case("true", true)]
    #[case("false", false)]
    #[case("TRUE", true)]
    #[case("False", false)]
    #[case(" true ", true)]
    fn bool_codec(#[case] text: &str, #[case] expected: bool) {
        assert_eq!(BoolCodec.value_from_text(text).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("yes")]
    #[case("1")]
    fn bool_codec_invalid(#[case] text: &str) {
        assert_eq!(
            BoolCodec.value_from_text(text).unwrap_err(),
            CodecError(format!("Expected 'true' or 'false', found '{text}'"))
        );
    }

    #[rstest]
    #[case("0", 0)]
    #[case("42", 42)]
    #[case("-42", -42)]
    #[case("+7", 7)]
    #[case("2147483647", i32::MAX)]
    #[case("-2147483648", i32::MIN)]
    fn int_codec(#[case] text: &str, #[case] expected: i32) {
        assert_eq!(IntCodec.value_from_text(text).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("x")]
    #[case("1.5")]
    #[case("2147483648")]
    fn int_codec_invalid(#[case] text: &str) {
        assert_eq!(
            IntCodec.value_from_text(text).unwrap_err(),
            CodecError(format!("Expected an integer, found '{text}'"))
        );
    }

    #[rstest]
    #[case("")]
    #[case("abc")]
    #[case(" padded ")]
    fn string_codec(#[case] text: &str) {
        assert_eq!(StringCodec.value_from_text(text).unwrap(), text);
    }

    #[rstest]
    #[case("Red", Colour::Red)]
    #[case("Blue", Colour::Blue)]
    fn enum_codec(#[case] text: &str, #[case] expected: Colour) {
        assert_eq!(colour_codec().value_from_text(text).unwrap(), expected);
        assert_eq!(colour_codec().text_from_value(&expected), text);
    }

    #[rstest]
    #[case("red")]
    #[case("Purple")]
    fn enum_codec_invalid(#[case] text: &str) {
        assert_eq!(
            colour_codec().value_from_text(text).unwrap_err(),
            CodecError(format!("Expected one of [Red, Green, Blue], found '{text}'"))
        );
    }

    #[test]
    fn enum_codec_can_encode() {
        let codec = EnumCodec::new("Colour", [("Red", Colour::Red)]);
        assert!(codec.can_encode(&Colour::Red));
        assert!(!codec.can_encode(&Colour::Blue));
        assert!(IntCodec.can_encode(&7));
    }

    #[test]
    fn codec_names() {
        assert_eq!(Codec::<bool>::name(&BoolCodec), "boolean");
        assert_eq!(Codec::<i32>::name(&IntCodec), "integer");
        assert_eq!(Codec::<String>::name(&StringCodec), "string");
        assert_eq!(colour_codec().name(), "Colour");
        assert_eq!(FromStrCodec::<u64>::new("count").name(), "count");
    }

    #[test]
    fn int_round_trip() {
        let mut rng = thread_rng();

        for _ in 0..100 {
            let value: i32 = rng.gen();
            let text = IntCodec.text_from_value(&value);
            assert_eq!(IntCodec.value_from_text(&text).unwrap(), value);
        }
    }

    #[test]
    fn bool_round_trip() {
        for value in [true, false] {
            let text = BoolCodec.text_from_value(&value);
            assert_eq!(BoolCodec.value_from_text(&text).unwrap(), value);
        }
    }

    #[test]
    fn enum_round_trip() {
        let codec = colour_codec();

        for value in [Colour::Red, Colour::Green, Colour::Blue] {
            let text = codec.text_from_value(&value);
            assert_eq!(codec.value_from_text(&text).unwrap(), value);
        }
    }

    #[test]
    fn from_str_round_trip() {
        let mut rng = thread_rng();
        let codec = FromStrCodec::<f64>::new("float");

        for _ in 0..100 {
            let value: f64 = rng.gen();
            let text = codec.text_from_value(&value);
            assert_eq!(codec.value_from_text(&text).unwrap(), value);
        }
        assert_eq!(
            codec.value_from_text("x").unwrap_err(),
            CodecError("Expected a float, found 'x'".to_string())
        );
    }
}
