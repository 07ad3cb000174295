use clam_parse::diagnostic::render;
use clam_parse::parse_str;
use pretty_assertions::assert_eq;

fn diagnose(src: &str, file: &str) -> String {
    let err = parse_str(src).expect_err("should fail");
    render(src, file, &err)
}

#[test]
fn unexpected_token_on_the_first_line() {
    assert_eq!(
        diagnose("let x = in x", "main.clam"),
        "\
error: unexpected token
 --> main.clam:1:8
let x = in x
        ^^
expected expression, got 'in'
"
    );
}

#[test]
fn invalid_escape_on_a_later_line() {
    let src = "let s =\n  \"a\\qb\" in s";
    assert_eq!(
        diagnose(src, "lib.clam"),
        "\
error: invalid escape sequence
 --> lib.clam:2:4
  \"a\\qb\" in s
    ^^
invalid escape sequence '\\q'
"
    );
}

#[test]
fn end_of_input_gets_a_single_caret() {
    assert_eq!(
        diagnose("1 +", "t.clam"),
        "\
error: unexpected token
 --> t.clam:1:3
1 +
   ^
expected expression, got 'EOF'
"
    );
}

#[test]
fn carriage_returns_are_not_echoed() {
    assert_eq!(
        diagnose("1 @\r\n2", "crlf.clam"),
        "\
error: unexpected token
 --> crlf.clam:1:2
1 @
  ^
expected operator or expression terminator, got 'invalid token'
"
    );
}

#[test]
fn underline_stops_at_the_end_of_the_line() {
    // The unterminated string runs to the end of input; only its first line
    // is shown.
    let out = diagnose("x \"open\nmore", "s.clam");
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines[1], " --> s.clam:1:2");
    assert_eq!(lines[2], "x \"open");
    assert_eq!(lines[3], "  ^^^^^");
}
