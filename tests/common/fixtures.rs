//! Reusable unit files and model documents.

use super::TestEnv;

/// Java-ish entity generator: one class per table of `schema/*.json`.
pub const LIBRARY_UNIT: &str = r#"
[unit]
name = "library"
namespace = "lib"
run_only_on_source_change = true

[unit.output_dirs]
default = "generated"

[options]
package = "com.acme.library"

[[outlets]]
name = "entity"
type = "template"
template = "package {{option:package}};\n\npublic class {{attr:name|pascal}} {\n{{mergepoint:fields}}}\n"

[[outlets]]
name = "columns"
type = "children"
select = "column"

[[outlets]]
name = "field"
type = "template"
template = "    private String {{attr:name|camel}};\n"

[[outlets]]
name = "filename"
type = "attribute"
attribute = "name"
transform = "pascal"
suffix = ".java"

[[mergepoints]]
outlet = "entity"
mergepoint = "fields"
outlets = ["columns"]

[[mergepoints]]
outlet = "columns"
mergepoint = "each"
outlets = ["field"]

[[outputs]]
name = "entities"
content_outlet = "entity"
filename_outlet = "filename"
[outputs.source]
type = "file"
base_dir = "schema"
include = ["*.json"]
element = "/database/table"
"#;

pub const LIBRARY_SCHEMA: &str = r#"{
  "database": {
    "@name": "library",
    "table": [
      {"@name": "book", "column": [{"@name": "book_id"}, {"@name": "title"}]},
      {"@name": "author_profile", "column": [{"@name": "full_name"}]}
    ]
  }
}
"#;

/// Unit whose content outlet maps mergepoint `body` to `[b, c]`, with `c`
/// declared first.
pub const ORDER_UNIT: &str = r#"
[unit]
name = "order"

[[outlets]]
name = "c"
type = "text"
text = "C"

[[outlets]]
name = "b"
type = "text"
text = "B"

[[outlets]]
name = "a"
type = "template"
template = "[{{mergepoint:body}}]"

[[mergepoints]]
outlet = "a"
mergepoint = "body"
outlets = ["b", "c"]

[[outputs]]
name = "out"
content_outlet = "a"
filename = "order.txt"
[outputs.source]
type = "inline"
document = '{"root": {}}'
"#;

/// A project with the library unit as `weaver.toml` and one schema file.
pub fn library_project() -> TestEnv {
    TestEnv::new()
        .with_file("weaver.toml", LIBRARY_UNIT)
        .with_file("schema/library.json", LIBRARY_SCHEMA)
}
