use teacup::{
    ast::Node,
    interpreter::{
        lexer::{TokenKind, tokenize},
        parser::{core::parse, priority::PriorityTable},
        tagger::tag_prefixes,
    },
};

fn parsed(src: &str) -> Node {
    let mut tokens = tokenize(src).unwrap_or_else(|e| panic!("Lexing failed: {src}\n{e}"));
    tag_prefixes(&mut tokens);

    parse(&tokens, &PriorityTable::teacup()).unwrap_or_else(|e| panic!("Parsing failed: {src}\n{e}"))
                                            .unwrap_or_else(|| panic!("Empty parse: {src}"))
}

fn signature(node: &Node) -> String {
    match node {
        Node::Leaf(token) => token.kind.name().to_string(),
        Node::Branch(branch) => branch.signature.clone(),
    }
}

fn operand(node: &Node, index: usize) -> &Node {
    match node {
        Node::Branch(branch) => branch.slots[index].as_ref().expect("slot is empty"),
        Node::Leaf(_) => panic!("expected a branch"),
    }
}

#[test]
fn trivial_handles_collapse_to_leaves() {
    for (src, kind) in [("7", TokenKind::Number),
                        ("x", TokenKind::Word),
                        ("\"hi\"", TokenKind::Str)]
    {
        match parsed(src) {
            Node::Leaf(token) => assert_eq!(token.kind, kind, "{src}"),
            Node::Branch(branch) => panic!("{src} did not collapse: {}", branch.signature),
        }
    }
}

#[test]
fn empty_input_parses_to_nothing() {
    let tokens = tokenize("").unwrap();
    assert!(parse(&tokens, &PriorityTable::teacup()).unwrap().is_none());
}

#[test]
fn left_associative_operators_nest_left() {
    let root = parsed("1 - 2 - 3");

    assert_eq!(signature(&root), "E - E");
    assert_eq!(signature(operand(&root, 0)), "E - E");
    assert_eq!(signature(operand(&root, 1)), "number");
}

#[test]
fn right_associative_operators_nest_right() {
    let root = parsed("2 ^ 3 ^ 2");

    assert_eq!(signature(&root), "E ^ E");
    assert_eq!(signature(operand(&root, 0)), "number");
    assert_eq!(signature(operand(&root, 1)), "E ^ E");
}

#[test]
fn tighter_operators_close_first() {
    // The middle operator outbinds both separators on both sides, so its
    // subtree is fully closed before the commas combine.
    let root = parsed("1 , 2 + 3 , 4");

    assert_eq!(signature(&root), "E , E , E");
    assert_eq!(signature(operand(&root, 1)), "E + E");
}

#[test]
fn separators_of_equal_priority_stay_flat() {
    assert_eq!(signature(&parsed("1 ; 2 ; 3")), "E ; E ; E");
    assert_eq!(signature(&parsed("1 , 2 , 3")), "E , E , E");
}

#[test]
fn brackets_become_single_nodes() {
    assert_eq!(signature(&parsed("(1 + 2)")), "_ ( E ) _");
    assert_eq!(signature(&parsed("[1, 2]")), "_ [ E ] _");
    assert_eq!(signature(&parsed("[]")), "_ [ _ ] _");
    assert_eq!(signature(&parsed("begin 1 end")), "_ begin E end _");
    assert_eq!(signature(&parsed("f(x)")), "E ( E ) _");
    assert_eq!(signature(&parsed("f()")), "E ( _ ) _");
    assert_eq!(signature(&parsed("xs[0]")), "E [ E ] _");
}

#[test]
fn keyword_constructs_become_single_nodes() {
    assert_eq!(signature(&parsed("if a then b else c end")),
               "_ if E then E else E end _");
    assert_eq!(signature(&parsed("if a then b elif c then d end")),
               "_ if E then E elif E then E end _");
    assert_eq!(signature(&parsed("let x = 1 in x end")), "_ let E in E end _");
    assert_eq!(signature(&parsed("for x in xs do x end")),
               "_ for E in E do E end _");
    assert_eq!(signature(&parsed("for x in xs when p do x end")),
               "_ for E in E when E do E end _");
}

#[test]
fn field_access_binds_tighter_than_arithmetic() {
    let root = parsed("a + b.c");

    assert_eq!(signature(&root), "E + E");
    assert_eq!(signature(operand(&root, 1)), "E . E");
}

#[test]
fn prefix_minus_parses_as_prefix_node() {
    let root = parsed("-3 + 4");

    assert_eq!(signature(&root), "E + E");
    assert_eq!(signature(operand(&root, 0)), "_ - E");
}

#[test]
fn lambdas_take_loose_right_operands() {
    let root = parsed("x -> x + 1");

    assert_eq!(signature(&root), "E -> E");
    assert_eq!(signature(operand(&root, 1)), "E + E");
}

#[test]
fn spans_cover_the_whole_expression() {
    let src = "1 + 2 * 3";
    let root = parsed(src);

    assert_eq!(root.start(), 0);
    assert_eq!(root.end(), src.len());
}

#[test]
fn tagger_marks_operand_position_operators() {
    let mut tokens = tokenize("- 1 - (- 2) - - 3").unwrap();
    tag_prefixes(&mut tokens);

    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(kinds,
               vec![TokenKind::Prefix,
                    TokenKind::Number,
                    TokenKind::Infix,
                    TokenKind::Open,
                    TokenKind::Prefix,
                    TokenKind::Number,
                    TokenKind::Close,
                    TokenKind::Infix,
                    TokenKind::Prefix,
                    TokenKind::Number]);
}

#[test]
fn tagger_is_idempotent() {
    let mut tokens = tokenize("-1 + -(2 * -3) and not 4").unwrap();
    tag_prefixes(&mut tokens);

    let once = tokens.clone();
    tag_prefixes(&mut tokens);

    assert_eq!(tokens, once);
}

#[test]
fn unknown_operators_are_rejected() {
    let mut table = PriorityTable::new();
    // Numbers alone are known; the operator is not.
    table.set("type:number", teacup::interpreter::parser::priority::Priority { left:  20_005,
                                                                               right: 20_005, });

    let tokens = tokenize("1 + 2").unwrap();
    assert!(parse(&tokens, &table).is_err());
}
