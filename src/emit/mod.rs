//! Docusaurus output: flat Markdown pages plus `sidebars.json`.
//!
//! Everything lands directly in the output directory: `index.md`, one
//! `<group>.md` per group, and the sidebar config. Pages carry Docusaurus
//! front matter so the directory can be dropped into a docs site as-is.

use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::doxygen::{ApiDocs, GroupDoc, NavTab, PageDoc};
use crate::error::Result;

/// Sidebar config root, serialized as `{"apiSidebar": [...]}`.
#[derive(Debug, Serialize)]
struct SidebarConfig {
    #[serde(rename = "apiSidebar")]
    api_sidebar: Vec<SidebarItem>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
enum SidebarItem {
    Doc {
        id: String,
        label: String,
    },
    Category {
        label: String,
        collapsible: bool,
        collapsed: bool,
        items: Vec<String>,
    },
}

/// Write all output files. Returns the number of Markdown pages written.
pub fn generate(output_dir: &Path, docs: &ApiDocs, navigation: &[NavTab]) -> Result<usize> {
    fs::create_dir_all(output_dir)?;

    let mut pages = 0;
    if let Some(index) = &docs.index {
        let content = render_index(index, docs, navigation);
        fs::write(output_dir.join("index.md"), content)?;
        info!("wrote index.md");
        pages += 1;
    }

    for group in &docs.groups {
        let content = render_group(group);
        fs::write(output_dir.join(format!("{}.md", group.name)), content)?;
        info!(group = %group.name, "wrote group page");
        pages += 1;
    }

    let sidebars = sidebar_config(docs, navigation);
    let json = serde_json::to_string_pretty(&sidebars)?;
    fs::write(output_dir.join("sidebars.json"), json)?;
    info!("wrote sidebars.json");

    Ok(pages)
}

fn render_index(index: &PageDoc, docs: &ApiDocs, navigation: &[NavTab]) -> String {
    let mut lines = vec![
        "---".to_string(),
        "id: index".to_string(),
        "slug: /".to_string(),
        format!("title: {}", index.title),
        "sidebar_label: Overview".to_string(),
        "---".to_string(),
        String::new(),
        format!("# {}", index.title),
        String::new(),
    ];

    if !index.brief.is_empty() {
        lines.push(index.brief.clone());
        lines.push(String::new());
    }
    if !index.detailed.is_empty() {
        lines.push(index.detailed.clone());
        lines.push(String::new());
    }

    lines.push("## Components".to_string());
    lines.push(String::new());
    for tab in navigation {
        let Some(group_ref) = &tab.group_ref else {
            continue;
        };
        let Some(group) = docs.group(group_ref) else {
            continue;
        };
        lines.push(format!("### [{}](./{group_ref})", group.title));
        lines.push(String::new());
        lines.push(group.brief.clone());
        lines.push(String::new());
    }

    lines.join("\n")
}

fn render_group(group: &GroupDoc) -> String {
    let mut lines = vec![
        "---".to_string(),
        format!("id: {}", group.name),
        format!("title: {}", group.title),
        format!("sidebar_label: {}", group.title),
        "---".to_string(),
        String::new(),
        format!("# {}", group.title),
        String::new(),
    ];

    if !group.brief.is_empty() {
        lines.push(group.brief.clone());
        lines.push(String::new());
    }
    if !group.detailed.is_empty() {
        lines.push(group.detailed.clone());
        lines.push(String::new());
    }

    if !group.subgroups.is_empty() {
        lines.push("## Sub-Modules".to_string());
        lines.push(String::new());
        for sub in &group.subgroups {
            lines.push(format!("- [{}](./{})", sub.name, sub.name));
        }
        lines.push(String::new());
    }

    if !group.typedefs.is_empty() {
        lines.push("## Type Definitions".to_string());
        lines.push(String::new());
        for td in &group.typedefs {
            lines.push(format!("### `{}`", td.name));
            lines.push(String::new());
            lines.push("```c".to_string());
            lines.push(td.definition.clone());
            lines.push("```".to_string());
            lines.push(String::new());
            if !td.brief.is_empty() {
                lines.push(td.brief.clone());
                lines.push(String::new());
            }
        }
    }

    if !group.enums.is_empty() {
        lines.push("## Enumerations".to_string());
        lines.push(String::new());
        for en in &group.enums {
            lines.push(format!("### `{}`", en.name));
            lines.push(String::new());
            if !en.brief.is_empty() {
                lines.push(en.brief.clone());
                lines.push(String::new());
            }
            if !en.values.is_empty() {
                lines.push("| Enumerator | Value | Description |".to_string());
                lines.push("|------------|-------|-------------|".to_string());
                for value in &en.values {
                    // Enumerator briefs are table cells: single line, capped
                    // so one long description can't blow up the column.
                    let brief: String = value.brief.replace('\n', " ").chars().take(50).collect();
                    lines.push(format!(
                        "| `{}` | {} | {} |",
                        value.name, value.initializer, brief
                    ));
                }
                lines.push(String::new());
            }
        }
    }

    if !group.defines.is_empty() {
        lines.push("## Macros".to_string());
        lines.push(String::new());
        for def in &group.defines {
            if def.value.is_empty() {
                lines.push(format!("### `{}`", def.name));
            } else {
                lines.push(format!("### `{} {}`", def.name, def.value));
            }
            lines.push(String::new());
            if !def.brief.is_empty() {
                lines.push(def.brief.clone());
                lines.push(String::new());
            }
        }
    }

    if !group.functions.is_empty() {
        lines.push("## Functions".to_string());
        lines.push(String::new());
        for func in &group.functions {
            lines.push(format!("### {}", func.name));
            lines.push(String::new());
            if !func.brief.is_empty() {
                lines.push(func.brief.clone());
                lines.push(String::new());
            }
            lines.push("```c".to_string());
            lines.push(func.signature.clone());
            lines.push("```".to_string());
            lines.push(String::new());

            if !func.params.is_empty() {
                lines.push("**Parameters:**".to_string());
                lines.push(String::new());
                for param in &func.params {
                    let mut line = format!("- **{}** (`{}`)", param.name, param.ty);
                    if !param.description.is_empty() {
                        line.push_str(": ");
                        line.push_str(&param.description);
                    }
                    lines.push(line);
                }
                lines.push(String::new());
            }

            if !func.return_desc.is_empty() {
                lines.push("**Returns:**".to_string());
                lines.push(String::new());
                lines.push(func.return_desc.clone());
                lines.push(String::new());
            }

            if !func.detailed.is_empty() && func.detailed != func.brief {
                lines.push(func.detailed.clone());
                lines.push(String::new());
            }

            lines.push("---".to_string());
            lines.push(String::new());
        }
    }

    lines.join("\n")
}

fn sidebar_config(docs: &ApiDocs, navigation: &[NavTab]) -> SidebarConfig {
    let mut items = vec![SidebarItem::Doc {
        id: "index".to_string(),
        label: "Overview".to_string(),
    }];

    for tab in navigation {
        if tab.kind == "mainpage" {
            continue;
        }
        let Some(group_ref) = &tab.group_ref else {
            continue;
        };
        if docs.group(group_ref).is_none() {
            continue;
        }

        let mut category_items = vec![group_ref.clone()];
        for sub in &tab.subtabs {
            if let Some(sub_ref) = &sub.group_ref {
                if docs.group(sub_ref).is_some() {
                    category_items.push(sub_ref.clone());
                }
            }
        }

        items.push(SidebarItem::Category {
            label: tab.title.clone(),
            collapsible: true,
            collapsed: false,
            items: category_items,
        });
    }

    SidebarConfig { api_sidebar: items }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doxygen::{Define, Enum, EnumValue, Function, GroupRef, Param, Typedef};

    fn sample_group() -> GroupDoc {
        GroupDoc {
            name: "group__core".to_string(),
            title: "Core API".to_string(),
            brief: "Primary entry points.".to_string(),
            detailed: "Longer prose.".to_string(),
            subgroups: vec![GroupRef {
                refid: "group__mem".to_string(),
                name: "group__mem".to_string(),
            }],
            functions: vec![Function {
                name: "wb_init".to_string(),
                signature: "int wb_init(wb_config_t *config)".to_string(),
                brief: "Initialize.".to_string(),
                detailed: "Call before anything else.".to_string(),
                params: vec![Param {
                    ty: "wb_config_t *".to_string(),
                    name: "config".to_string(),
                    description: "Configuration block.".to_string(),
                }],
                return_desc: "0 on success.".to_string(),
            }],
            typedefs: vec![Typedef {
                name: "wb_handle_t".to_string(),
                definition: "typedef struct wb_handle* wb_handle_t".to_string(),
                brief: "Opaque handle.".to_string(),
            }],
            enums: vec![Enum {
                name: "wb_status_t".to_string(),
                brief: "Status codes.".to_string(),
                values: vec![EnumValue {
                    name: "WB_OK".to_string(),
                    initializer: "= 0".to_string(),
                    brief: "Success.".to_string(),
                }],
            }],
            defines: vec![Define {
                name: "WB_MAX".to_string(),
                value: "(64)".to_string(),
                brief: "Capacity.".to_string(),
            }],
        }
    }

    #[test]
    fn test_group_page_sections_in_order() {
        let page = render_group(&sample_group());
        let submodules = page.find("## Sub-Modules").unwrap();
        let typedefs = page.find("## Type Definitions").unwrap();
        let enums = page.find("## Enumerations").unwrap();
        let macros = page.find("## Macros").unwrap();
        let functions = page.find("## Functions").unwrap();
        assert!(submodules < typedefs);
        assert!(typedefs < enums);
        assert!(enums < macros);
        assert!(macros < functions);
    }

    #[test]
    fn test_group_front_matter() {
        let page = render_group(&sample_group());
        assert!(page.starts_with("---\nid: group__core\ntitle: Core API\n"));
        assert!(page.contains("sidebar_label: Core API"));
    }

    #[test]
    fn test_function_rendering() {
        let page = render_group(&sample_group());
        assert!(page.contains("### wb_init"));
        assert!(page.contains("```c\nint wb_init(wb_config_t *config)\n```"));
        assert!(page.contains("- **config** (`wb_config_t *`): Configuration block."));
        assert!(page.contains("**Returns:**\n\n0 on success."));
    }

    #[test]
    fn test_detailed_equal_to_brief_not_repeated() {
        let mut group = sample_group();
        group.functions[0].detailed = group.functions[0].brief.clone();
        let page = render_group(&group);
        assert_eq!(page.matches("Initialize.").count(), 1);
    }

    #[test]
    fn test_enum_value_brief_truncated() {
        let mut group = sample_group();
        group.enums[0].values[0].brief = "x".repeat(80);
        let page = render_group(&group);
        assert!(page.contains(&format!("| {} |", "x".repeat(50))));
        assert!(!page.contains(&"x".repeat(51)));
    }

    #[test]
    fn test_macro_heading_includes_value() {
        let page = render_group(&sample_group());
        assert!(page.contains("### `WB_MAX (64)`"));
    }

    #[test]
    fn test_index_links_components() {
        let docs = ApiDocs {
            index: Some(PageDoc {
                title: "My Library".to_string(),
                brief: "Short.".to_string(),
                detailed: String::new(),
            }),
            groups: vec![sample_group()],
        };
        let navigation = vec![NavTab {
            kind: "usergroup".to_string(),
            title: "Core".to_string(),
            group_ref: Some("group__core".to_string()),
            subtabs: Vec::new(),
        }];
        let page = render_index(docs.index.as_ref().unwrap(), &docs, &navigation);
        assert!(page.contains("slug: /"));
        assert!(page.contains("# My Library"));
        assert!(page.contains("### [Core API](./group__core)"));
    }

    #[test]
    fn test_sidebar_structure() {
        let docs = ApiDocs {
            index: None,
            groups: vec![sample_group()],
        };
        let navigation = vec![
            NavTab {
                kind: "mainpage".to_string(),
                title: "Home".to_string(),
                group_ref: None,
                subtabs: Vec::new(),
            },
            NavTab {
                kind: "usergroup".to_string(),
                title: "Core".to_string(),
                group_ref: Some("group__core".to_string()),
                subtabs: vec![NavTab {
                    kind: "user".to_string(),
                    title: "Missing".to_string(),
                    group_ref: Some("group__absent".to_string()),
                    subtabs: Vec::new(),
                }],
            },
        ];

        let config = sidebar_config(&docs, &navigation);
        let json = serde_json::to_value(&config).unwrap();
        let items = json["apiSidebar"].as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["type"], "doc");
        assert_eq!(items[0]["id"], "index");
        assert_eq!(items[1]["type"], "category");
        assert_eq!(items[1]["label"], "Core");
        assert_eq!(items[1]["collapsed"], false);
        let cat_items = items[1]["items"].as_array().unwrap();
        assert_eq!(cat_items.len(), 1);
        assert_eq!(cat_items[0], "group__core");
    }
}
