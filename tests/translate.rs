//! End-to-end translation from rule source to header and body text.

use fuzzygen::dsl::error::ErrorKind;
use fuzzygen::dsl::{Compiler, FnSink, TranslateOptions};

/// Obstacle-avoiding robot: one input distance, two wheel speed outputs.
const ROBOT: &str = r#"
domain Distance from 0 to 300 {
    close = left(100, 50);
    far = right(100, 50);
}

domain Speed from 0 to 255 {
    stopped = centre(0, 0);
    slow = left(64, 64);
    medium = centre(128, 64);
    fast = right(196, 64);
}

vars {
    obstruction : in Distance;
    left, right : out Speed;
}

rules {
    if obstruction is close then left := slow, right := stopped;
    if obstruction is far then left := fast, right := fast;
    if obstruction is somewhat close or obstruction is very far then right := medium;
}
"#;

fn translate(src: &str) -> (String, String) {
    let artifacts = Compiler::translate(src, &TranslateOptions::default()).expect("translate failed");
    (artifacts.header, artifacts.body)
}

// =============================================================================
// Declarations
// =============================================================================

#[test]
fn robot_header_declares_domains_and_variables() {
    let (header, _) = translate(ROBOT);
    assert!(header.starts_with("#include <fuzzy.h>\n"));
    assert!(header.contains("class Distance : public FuzzyVariable"));
    assert!(header.contains("    static const int CLOSE = 0;\n    static const int FAR = 1;\n"));
    assert!(header.contains(
        "    static const int STOPPED = 0;\n    static const int SLOW = 1;\n    \
         static const int MEDIUM = 2;\n    static const int FAST = 3;\n"
    ));
    assert!(header.contains(
        "extern FuzzyInput<Distance> obstruction;\nextern FuzzyOutput<Speed> left;\n\
         extern FuzzyOutput<Speed> right;\n"
    ));
    assert!(header.ends_with("\nvoid runFuzzyEngine();\n"));
}

#[test]
fn domain_sections_sorted_in_both_artifacts() {
    let src = "domain Zulu from 0 to 1 { a = f(1); }\ndomain Echo from 0 to 1 { b = f(1); }\n";
    let (header, body) = translate(src);
    assert!(header.find("class Echo").unwrap() < header.find("class Zulu").unwrap());
    assert!(body.find("DOMAIN Echo").unwrap() < body.find("DOMAIN Zulu").unwrap());
}

// =============================================================================
// Definitions
// =============================================================================

#[test]
fn robot_body_defines_membership_and_rules() {
    let (_, body) = translate(ROBOT);
    assert!(body.starts_with("#include \"fuzzy_engine.h\"\n\n"));
    assert!(body.contains("FuzzyInput<Distance> obstruction;\n"));
    assert!(body.contains("int Speed::maxRange() const { return 255; }"));
    assert!(body.contains("    m = fmax(m, category==FAST ? right(crispValue, 196, 64) : 0);\n"));
    assert!(body.contains(
        "    left.reset();\n    right.reset();\n\n\
         \x20   m = obstruction.is(Distance::CLOSE);\n\
         \x20   left.addMembership(Speed::SLOW, m);\n\
         \x20   right.addMembership(Speed::STOPPED, m);\n"
    ));
    assert!(body.contains(
        "    m = FuzzyLogic::f_or(obstruction.is(FuzzyVariable::SOMEWHAT,Distance::CLOSE), \
         obstruction.is(FuzzyVariable::VERY,Distance::FAR));\n    \
         right.addMembership(Speed::MEDIUM, m);\n}\n"
    ));
}

#[test]
fn negated_hedge_example() {
    let src = "domain Temp from 0 to 100 { cold = tri(0,0,50); hot = tri(50,100,100); }\n\
               vars { t : in Temp; w : out Temp; }\n\
               rules { if t is not very cold then w := hot; }";
    let (_, body) = translate(src);
    assert!(body.contains("    m = FuzzyLogic::f_not(t.is(FuzzyVariable::VERY,Temp::COLD));\n"));
}

#[test]
fn three_way_or_keeps_all_operands() {
    let src = "domain T from 0 to 9 { a = f(1); b = f(2); c = f(3); }\n\
               vars { x : in T; y : out T; }\n\
               rules { if x is a or x is b or x is c then y := a; }";
    let (_, body) = translate(src);
    assert!(body.contains(
        "m = FuzzyLogic::f_or(FuzzyLogic::f_or(x.is(T::A), x.is(T::B)), x.is(T::C));"
    ));
}

#[test]
fn callback_sink_matches_string_output() {
    let program = Compiler::parse(ROBOT).unwrap();
    let options = Default::default();
    let mut chunks: Vec<String> = Vec::new();
    fuzzygen::dsl::generate_body(&program, &options, &mut FnSink(|s: &str| chunks.push(s.to_string())))
        .unwrap();
    let (_, body) = translate(ROBOT);
    assert_eq!(chunks.concat(), body);
}

#[test]
fn translation_is_byte_stable() {
    let first = Compiler::translate(ROBOT, &TranslateOptions::default()).unwrap();
    let second = Compiler::translate(ROBOT, &TranslateOptions::default()).unwrap();
    assert_eq!(first, second);
}

// =============================================================================
// Failures
// =============================================================================

#[test]
fn hash_character_fails_lexing_with_line() {
    let src = ROBOT.replace("far = right(100, 50);", "far = right(100, 50); # tuned");
    let err = Compiler::translate(&src, &TranslateOptions::default()).unwrap_err();
    assert_eq!(err.kind, ErrorKind::LexError);
    assert_eq!(err.line, 4);
    assert!(err.message.contains("'#'"));
}

#[test]
fn undeclared_variable_points_at_identifier() {
    let src = ROBOT.replace("then right := medium", "then middle := medium");
    let err = Compiler::parse(&src).unwrap_err();
    let token = err.token.expect("error should carry a token");
    assert_eq!(token.text, "middle");
    assert_eq!(token.line, 22);
    assert_eq!(err.line, 22);
}

#[test]
fn duplicate_domain_reported_before_rules() {
    let src = ROBOT.replacen("domain Speed", "domain Distance", 1);
    let err = Compiler::parse(&src).unwrap_err();
    assert_eq!(err.kind, ErrorKind::SemanticError);
    assert_eq!(err.message, "Domain 'Distance' already declared");
    assert_eq!(err.line, 7);
}

#[test]
fn every_error_has_a_line() {
    let sources = [
        "domain",
        "domain A from 0 to 1 { a = f(); }",
        "vars { x : in Missing; }",
        "domain A from 0 to 1 { a = f(1); } vars { x : in A; } rules { if x is b then x := a; }",
        "domain A from 0 to 1 { a = f(1); } vars { x : in A; } rules { if x is a then x = a; }",
    ];
    for src in sources {
        let err = Compiler::parse(src).unwrap_err();
        assert!(err.line >= 1, "no line for {src:?}: {err}");
    }
}
