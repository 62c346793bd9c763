//! Grammar-level tests pinning down the behavior the format guarantees.

use hrtds::{from_str, to_string, Error};

#[test]
fn scalar_fields_parse_to_typed_values() {
    let document = from_str("${ &int&Age:32; &string&Name:\"A,B\"; }$").unwrap();
    assert_eq!(document["Age"].as_i64(), Some(32));
    assert_eq!(document["Name"].as_str(), Some("A,B"));
}

#[test]
fn struct_instances_are_field_addressable() {
    let document = from_str("${ &struct&P:{&int&X,&int&Y}; &P&Origin:(0,0); }$").unwrap();
    assert_eq!(document["Origin"]["X"].as_i64(), Some(0));
    assert_eq!(document["Origin"]["Y"].as_i64(), Some(0));
}

#[test]
fn scalar_arrays_compose_on_a_single_line() {
    let document = from_str("${ &int[]&Nums:[1,2,3]; }$").unwrap();
    assert_eq!(document["Nums"].len(), 3);

    let composed = to_string(&document).unwrap();
    assert!(composed.contains("[1, 2, 3]"), "composed was: {composed}");
}

#[test]
fn struct_typed_arrays_compose_across_lines() {
    let document =
        from_str("${ &struct&P:{&int&X,&int&Y}; &P[]&Path:[(1,2),(3,4)]; }$").unwrap();
    let composed = to_string(&document).unwrap();
    assert!(
        composed.contains("[\n\t\t(1, 2), \n\t\t(3, 4)\n\t]"),
        "composed was: {composed}"
    );
}

#[test]
fn quoted_literals_preserve_structural_characters() {
    let tricky = "a,b:c;d&e{f}[g](h)";
    let text = format!("${{ &string&S:\"{tricky}\"; }}$");

    let document = from_str(&text).unwrap();
    assert_eq!(document["S"].as_str(), Some(tricky));

    let reparsed = from_str(&to_string(&document).unwrap()).unwrap();
    assert_eq!(reparsed["S"].as_str(), Some(tricky));
}

#[test]
fn quoted_literals_preserve_interior_whitespace() {
    let document = from_str("${ &string&S:\"  spaced\tout  \"; }$").unwrap();
    assert_eq!(document["S"].as_str(), Some("  spaced\tout  "));
}

#[test]
fn integral_decode_saturates_instead_of_failing() {
    let document = from_str(
        "${ &int8&Big:300; &int8&Small:-300; &uint16&Negative:-7; &uint64&Huge:99999999999999999999999999; }$",
    )
    .unwrap();

    assert_eq!(document["Big"].as_i64(), Some(127));
    assert_eq!(document["Small"].as_i64(), Some(-128));
    assert_eq!(document["Negative"].as_u64(), Some(0));
    assert_eq!(document["Huge"].as_u64(), Some(u64::MAX));
}

#[test]
fn using_a_struct_before_declaration_fails() {
    assert!(matches!(
        from_str("${ &P&Origin:(0,0); &struct&P:{&int&X,&int&Y}; }$"),
        Err(Error::UnresolvedIdentifier { .. })
    ));
}

#[test]
fn a_struct_cannot_reference_itself() {
    assert!(matches!(
        from_str("${ &struct&Node:{&int&Id,&Node[]&Children}; }$"),
        Err(Error::UnresolvedIdentifier { .. })
    ));
}

#[test]
fn tuple_arity_must_match_exactly() {
    let declaration = "&struct&P:{&int&X,&int&Y};";

    assert!(from_str(&format!("${{ {declaration} &P&V:(1,2); }}$")).is_ok());
    assert!(matches!(
        from_str(&format!("${{ {declaration} &P&V:(1); }}$")),
        Err(Error::ArityMismatch { .. })
    ));
    assert!(matches!(
        from_str(&format!("${{ {declaration} &P&V:(1,2,3); }}$")),
        Err(Error::ArityMismatch { .. })
    ));
}

#[test]
fn scopes_may_not_nest_inside_lists() {
    assert!(matches!(
        from_str("${ &int[]&Nums:[{&int&X}]; }$"),
        Err(Error::ScopeInList)
    ));
}

#[test]
fn empty_documents_are_valid() {
    let document = from_str("${}$").unwrap();
    assert!(document.is_empty());

    let reparsed = from_str(&to_string(&document).unwrap()).unwrap();
    assert!(reparsed.is_empty());
}

#[test]
fn content_outside_the_markers_is_ignored() {
    let document = from_str("preamble ${ &int&N:1; }$ trailing notes").unwrap();
    assert_eq!(document["N"].as_i64(), Some(1));
}

#[test]
fn redeclaring_a_struct_overwrites_the_layout() {
    let document = from_str(
        "${ &struct&P:{&int&X,&int&Y}; &struct&P:{&string&Label}; &P&V:(\"only\"); }$",
    )
    .unwrap();
    assert_eq!(document["V"]["Label"].as_str(), Some("only"));
}

#[test]
fn deep_array_nesting_through_structs_round_trips() {
    // Board is Grid { Rows: [Row { Cells: [1,2] }, Row { Cells: [3,4] }] }
    let document = from_str(
        "${ &struct&Row:{&int[]&Cells}; &struct&Grid:{&Row[]&Rows}; \
         &Grid&Board:([([1,2]),([3,4])]); }$",
    )
    .unwrap();

    let board = &document["Board"];
    assert_eq!(board["Rows"][1]["Cells"][0].as_i64(), Some(3));

    let reparsed = from_str(&to_string(&document).unwrap()).unwrap();
    assert_eq!(document, reparsed);
}
