use ceeparser::{children, NodeKind, Parser};

fn parse_ok(source: &str) -> ceeparser::SyntaxTree {
    let tree = Parser::new(source).parse();
    assert!(tree.errors().is_empty(), "unexpected errors: {:?}", tree.errors());
    tree
}

#[test]
fn simple_declaration_tree_shape() {
    let tree = parse_ok("int x = 1;");
    let arena = tree.arena();
    let root = tree.root().unwrap();
    assert_eq!(arena.get(root).kind, NodeKind::TranslationUnit);

    let decl = children(arena, root)[0];
    assert_eq!(arena.get(decl).kind, NodeKind::Declaration);

    let decl_kids = children(arena, decl);
    assert_eq!(arena.get(decl_kids[0]).kind, NodeKind::DeclarationSpecifiers);
    assert_eq!(arena.get(decl_kids[1]).kind, NodeKind::InitDeclarator);

    let init_decl_kids = children(arena, decl_kids[1]);
    assert_eq!(arena.get(init_decl_kids[0]).kind, NodeKind::Identifier);
    assert_eq!(arena.get(init_decl_kids[1]).kind, NodeKind::Initializer);
}

#[test]
fn typedef_struct_then_use_as_a_type_name() {
    let tree = parse_ok("typedef struct S { int a; } S; S v;");
    let arena = tree.arena();
    let root = tree.root().unwrap();
    let decls = children(arena, root);
    assert_eq!(decls.len(), 2);

    // The second declaration's specifier resolves `S` to a typedef name
    // rather than falling through as a bare identifier declarator.
    let second = children(arena, decls[1]);
    let specs = children(arena, second[0]);
    assert_eq!(arena.get(specs[0]).kind, NodeKind::TypedefName);
}

#[test]
fn right_associative_assignment_chain() {
    let tree = parse_ok("void f(void) { a = b = c; }");
    let arena = tree.arena();
    let root = tree.root().unwrap();
    let func = children(arena, root)[0];
    assert_eq!(arena.get(func).kind, NodeKind::FunctionDefinition);
}

#[test]
fn left_associative_additive_chain() {
    let tree = parse_ok("int x = a + b - c;");
    assert!(tree.errors().is_empty());
}

#[test]
fn nested_ternary_is_right_associative() {
    let tree = parse_ok("int x = a ? b : c ? d : e;");
    assert!(tree.errors().is_empty());
}

#[test]
fn raw_string_round_trips_through_the_lexer() {
    let lexemes = ceeparser::lex("R\"xy(hello)xy\"");
    assert_eq!(lexemes[1].kind, ceeparser::LexemeKind::String);
    assert!(!lexemes.iter().any(|l| l.kind == ceeparser::LexemeKind::Invalid));
}

#[test]
fn raw_string_delimiter_mismatch_is_invalid() {
    let lexemes = ceeparser::lex("R\"xy(hello)yy\"");
    assert_eq!(lexemes.last().unwrap().kind, ceeparser::LexemeKind::Invalid);
}

#[test]
fn hex_int_with_suffix_lexes_as_one_token() {
    let lexemes = ceeparser::lex("0xFFull");
    assert_eq!(lexemes[1].kind, ceeparser::LexemeKind::Int);
    assert_eq!(lexemes[1].len(), "0xFFull".len());
}

#[test]
fn scoped_typedef_does_not_leak_past_its_block() {
    let tree = parse_ok("void f(void) { typedef int local_t; local_t x; }");
    assert!(tree.errors().is_empty());

    // Outside that function, `local_t` is just an identifier again: using it
    // as a type name would misparse, so this has to fail to be a type use.
    let leaked = Parser::new("local_t y;").parse();
    assert!(!leaked.errors().is_empty());
}

#[test]
fn function_with_parameters_and_return() {
    let tree = parse_ok("int add(int a, int b) { return a + b; }");
    let arena = tree.arena();
    let root = tree.root().unwrap();
    let func = children(arena, root)[0];
    assert_eq!(arena.get(func).kind, NodeKind::FunctionDefinition);
}

#[test]
fn for_loop_with_declaration_in_the_init_clause() {
    let tree = parse_ok("void f(void) { for (int i = 0; i < 10; i = i + 1) { } }");
    assert!(tree.errors().is_empty());
}

#[test]
fn switch_with_case_and_default() {
    let tree = parse_ok("void f(int x) { switch (x) { case 1: break; default: break; } }");
    assert!(tree.errors().is_empty());
}

#[test]
fn span_marking_points_boundary_tokens_at_their_owning_node() {
    let tree = parse_ok("int x = 1;");
    let arena = tree.arena();
    let tokens = tree.tokens();
    let root = tree.root().unwrap();
    assert_eq!(arena.get(root).kind, NodeKind::TranslationUnit);

    let decl = children(arena, root)[0];
    let init_decl = children(arena, decl)[1];
    assert_eq!(arena.get(init_decl).kind, NodeKind::InitDeclarator);

    // Declaration's own boundary tokens ("int" and the trailing ";") are
    // also the root's boundary tokens here (one declaration spans the
    // whole unit); the root is built last, so it's the one left holding
    // the claim.
    assert_eq!(tokens[1].span(), Some(root));
    assert_eq!(tokens[5].span(), Some(root));

    // "x" and "1" sit on InitDeclarator's boundary, and no ancestor's edge
    // lands on either position, so InitDeclarator keeps the claim.
    assert_eq!(tokens[2].span(), Some(init_decl));
    assert_eq!(tokens[4].span(), Some(init_decl));

    // "=" is consumed directly without ever becoming a node of its own;
    // nothing claims it. Same for the Bof/Eof brackets.
    assert_eq!(tokens[3].span(), None);
    assert_eq!(tokens[0].span(), None);
    assert_eq!(tokens[6].span(), None);
}
