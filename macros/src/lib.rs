//! Proc macros for pagebox: `page!` markup for filling a builder.
//!
//! This crate is not meant to be used directly; enable the `macros` feature on `pagebox`.

use proc_macro::TokenStream;

mod page_macro;

/// Markup-style page construction.
///
/// Expands to builder calls on the given builder, propagating errors with
/// `?`, so it must be used inside a function returning a `Result` whose
/// error converts from `pagebox::BuildError` (page functions qualify).
///
/// # Syntax
///
/// `page!(builder => elements...)` where `builder` is a place of type
/// `Builder`, `&mut Builder` or `Scope`.
///
/// - `<Widget attr=value />` adds a widget at the cursor
/// - `<Widget attr=value> ... </Widget>` opens a scope; children attach inside it
/// - A bare tag name refers to `pagebox::widgets`; a path (`charts::LineChart`) is used as is
///
/// # Attributes
///
/// - Values are literals (`"text"`, `4`, `true`) or braced expressions (`{count + 1}`)
/// - `new=value` passes `value` to `::new()`
/// - `Text value`, `TextButton text`, `ElevatedButton text`, `Tab text` and
///   `Icon name` are constructor arguments
/// - Every other attribute becomes a `.with_<name>(value)` call
///
/// # Example
///
/// ```ignore
/// page!(cx.builder =>
///     <Column spacing=8>
///         <Text value="Inbox" size=20 />
///         <TextButton text={format!("{unread} unread")} />
///     </Column>
/// );
/// ```
#[proc_macro]
pub fn page(input: TokenStream) -> TokenStream {
    page_macro::page_impl(input.into())
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
