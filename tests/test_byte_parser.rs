use cigartree::parser::ByteParser;
use cigartree::parser::ParsingErrorType;

#[test]
fn test_skip_whitespace() {
    let mut parser = ByteParser::for_str(" \r  \t\n \t x y");
    parser.skip_whitespace();
    assert_eq!(parser.peek(), Some(b'x'));

    parser.next_byte(); // skip x
    parser.skip_whitespace();
    assert_eq!(parser.peek(), Some(b'y'));
}

#[test]
fn test_skip_comment() {
    let mut parser = ByteParser::for_str("[family PF00001] (A:1,B:1);");
    assert!(parser.skip_comment().unwrap());
    assert_eq!(parser.next_byte(), Some(b' '));
    assert_eq!(parser.next_byte(), Some(b'('));
    assert!(!parser.skip_comment().unwrap());
    assert_eq!(parser.peek(), Some(b'A'));
}

#[test]
fn test_unclosed_comment() {
    let mut parser = ByteParser::for_str("[never closed (A,B);");
    let err = parser.skip_comment().unwrap_err();
    assert_eq!(err.kind(), &ParsingErrorType::UnclosedComment);
    assert!(parser.is_eof());
}

#[test]
fn test_skip_comment_and_whitespace() {
    let mut parser = ByteParser::for_str("[Go] \n[Keep going]   \t ['...']\n[One more to go]  END!");
    parser
        .skip_comment_and_whitespace()
        .expect("Failed to skip comments.");
    assert_eq!(parser.next_byte(), Some(b'E'));
}

#[test]
fn test_consume_if() {
    let mut parser = ByteParser::for_str("(a");
    assert!(!parser.consume_if(b')'));
    assert!(parser.consume_if(b'('));
    assert!(parser.consume_if(b'A'));
    assert!(parser.is_eof());
    assert!(!parser.consume_if(b'A'));
}

#[test]
fn test_peek_is_word_does_not_consume() {
    let parser = ByteParser::for_str("# Stockholm 1.0");
    assert!(parser.peek_is_word("# STOCKHOLM"));
    assert!(!parser.peek_is_word("# STOCKHOLMX 1.0 and more"));
    assert_eq!(parser.position(), 0);
}

#[test]
fn test_parse_label_quoted() {
    let mut parser = ByteParser::for_str("  'Homo sapiens'':1' :0.5");
    let label = parser.parse_label(b",:;)").unwrap();
    assert_eq!(label, "Homo sapiens':1");
    assert_eq!(parser.next_byte(), Some(b' '));
}

#[test]
fn test_parse_label_unquoted() {
    let mut parser = ByteParser::for_str("[c]Fratercula_arctica:0.1");
    let label = parser.parse_label(b",:;)").unwrap();
    assert_eq!(label, "Fratercula_arctica");
    assert_eq!(parser.peek(), Some(b':'));
}

#[test]
fn test_parse_lines_of_fasta_record() {
    let mut parser = ByteParser::for_str(">A desc\r\nAC-T\n\nGG");
    assert!(parser.consume_if(b'>'));
    assert_eq!(parser.parse_line(), "A desc");
    assert_eq!(parser.parse_line(), "AC-T");
    assert_eq!(parser.parse_line(), "");
    assert_eq!(parser.parse_line(), "GG");
    assert!(parser.is_eof());
}

#[test]
fn test_context() {
    let mut parser = ByteParser::for_str(">A\nAC-T");
    parser.parse_line();
    assert_eq!(parser.position(), 3);
    assert_eq!(parser.get_context_as_string(3), "AC-");
    assert_eq!(parser.get_context_as_string(10), "AC-T");
}
