//! Language reference for the qmellow CLI

/// Get the language reference shown by `qmellow syntax`
pub fn get_syntax_reference() -> &'static str {
    r#"QMELLOW SYNTAX

A qmellow query says whether a document should be included. It combines
match primitives with `and`, `or` and `not`, and reports the lines that
decided the verdict.

MATCH PRIMITIVES

  'text'            Text anywhere on a line, ignoring case
  "text"            Text anywhere on a line, exact case
  #name             An element with id="name"
  .a.b              One element carrying both classes a and b
  /path/file.css    A stylesheet reference to /path/file.css
  /path/file.js     A script reference to /path/file.js
  /path/pic.png     An image reference (also .jpg, .svg, .gif)
  /path/page        A link (href) to /path/page

OPERATORS (loosest first)

  x or y            Either side matches
  x and y           Both sides match
  not x             x does not match
  ( x )             Grouping

STRINGS

  Escapes: \\  \'  \"  \n  \r  \t
  Only printable ASCII may appear unescaped.

COMMENTS

  -- everything from a dash to the end of the line is ignored

EXAMPLES

  /styles/site.css and not /img/old_logo.png
  #login or 'sign in'
  .btn.primary and ("Buy now" or "Add to cart")

EVIDENCE

  When both sides of `and`/`or` agree, the lines found by both are reported.
  When they disagree, only the lines of the side that decided the result
  are kept. `not` flips the verdict but keeps the lines.
"#
}
