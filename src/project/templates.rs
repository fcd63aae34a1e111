//! 文件模板模块
//!
//! 生成项目所需的文件目录，模板在编译期通过 `include_str!` 嵌入，
//! 运行时使用 Handlebars 渲染。模板变量：
//! - `{{project_name}}` - 项目名称，例如 `my-project`
//! - `{{package_name}}` - 包名，例如 `my_project`
//! - `{{version}}` / `{{description}}` / `{{requires_python}}` / `{{license}}` - 项目元数据
//! - `{{authors}}` - 已渲染好的 TOML 内联数组
//!
//! 辅助函数 `{{toml_str value}}` 输出带转义的 TOML 字符串。

use crate::config::ProjectConfig;
use crate::error::{Result, TemplateError};
use crate::project::naming::ProjectName;
use handlebars::{handlebars_helper, no_escape, Handlebars};
use serde::Serialize;
use std::path::PathBuf;

/// 单个文件模板：相对路径模板和内容模板
#[derive(Debug, Clone, Copy)]
pub struct FileTemplate {
    /// 相对于项目根目录的路径（可包含模板变量）
    pub path: &'static str,
    /// 文件内容模板
    pub body: &'static str,
}

/// 写入顺序即目录顺序
pub const CATALOG: &[FileTemplate] = &[
    FileTemplate {
        path: "src/{{package_name}}/__init__.py",
        body: "",
    },
    FileTemplate {
        path: "src/{{package_name}}/main.py",
        body: include_str!("../templates/main.py.hbs"),
    },
    FileTemplate {
        path: "tests/__init__.py",
        body: "",
    },
    FileTemplate {
        path: "tests/test_main.py",
        body: include_str!("../templates/test_main.py.hbs"),
    },
    FileTemplate {
        path: "docs/index.md",
        body: include_str!("../templates/index.md.hbs"),
    },
    FileTemplate {
        path: "README.md",
        body: include_str!("../templates/README.md.hbs"),
    },
    FileTemplate {
        path: ".gitignore",
        body: include_str!("../templates/gitignore.hbs"),
    },
    FileTemplate {
        path: "pyproject.toml",
        body: include_str!("../templates/pyproject.toml.hbs"),
    },
    FileTemplate {
        path: "requirements.in",
        body: include_str!("../templates/requirements.in.hbs"),
    },
];

/// 模板上下文数据
#[derive(Debug, Clone, Serialize)]
pub struct TemplateContext {
    pub project_name: String,
    pub package_name: String,
    pub version: String,
    pub description: String,
    pub requires_python: String,
    pub license: String,
    pub authors: String,
}

impl TemplateContext {
    /// 由项目名称和元数据构造上下文
    pub fn new(project: &ProjectName, metadata: &ProjectConfig) -> Self {
        Self {
            project_name: project.as_str().to_string(),
            package_name: project.package_name().as_str().to_string(),
            version: metadata.version.clone(),
            description: metadata.description.clone(),
            requires_python: metadata.requires_python.clone(),
            license: metadata.license.clone(),
            authors: render_authors(metadata),
        }
    }
}

/// 渲染后的文件
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFile {
    pub relative_path: PathBuf,
    pub contents: String,
}

handlebars_helper!(toml_str: |value: str| quote_toml(value));

/// 模板渲染器
pub struct TemplateRenderer {
    registry: Handlebars<'static>,
}

impl Default for TemplateRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer {
    /// 创建渲染器
    ///
    /// 启用严格模式（未知变量报错）并关闭HTML转义
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(no_escape);
        registry.register_helper("toml_str", Box::new(toml_str));

        Self { registry }
    }

    /// 渲染单个模板（路径和内容）
    ///
    /// 内容取自 `template.body`，不要求模板属于 `CATALOG`
    pub fn render(
        &self,
        template: &FileTemplate,
        context: &TemplateContext,
    ) -> Result<RenderedFile> {
        let relative_path = self.render_str(template.path, template.path, context)?;
        let contents = self.render_str(template.path, template.body, context)?;

        Ok(RenderedFile {
            relative_path: PathBuf::from(relative_path),
            contents,
        })
    }

    fn render_str(&self, name: &str, source: &str, context: &TemplateContext) -> Result<String> {
        let rendered = self
            .registry
            .render_template(source, context)
            .map_err(|e| TemplateError::Render {
                name: name.to_string(),
                message: e.to_string(),
            })?;
        Ok(rendered)
    }

    /// 按顺序渲染整个目录
    pub fn render_catalog(&self, context: &TemplateContext) -> Result<Vec<RenderedFile>> {
        CATALOG
            .iter()
            .map(|template| self.render(template, context))
            .collect()
    }
}

/// 输出TOML基本字符串（含引号和转义）
fn quote_toml(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c.is_control() => quoted.push_str(&format!("\\u{:04X}", c as u32)),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

/// 作者列表渲染为 TOML 内联表数组
fn render_authors(metadata: &ProjectConfig) -> String {
    if metadata.authors.is_empty() {
        return "[]".to_string();
    }

    let mut rendered = String::from("[\n");
    for author in &metadata.authors {
        let entry = match &author.email {
            Some(email) => format!(
                "{{ name = {}, email = {} }}",
                quote_toml(&author.name),
                quote_toml(email)
            ),
            None => format!("{{ name = {} }}", quote_toml(&author.name)),
        };
        rendered.push_str(&format!("    {entry},\n"));
    }
    rendered.push(']');
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Author;
    use crate::error::ScaffoldError;

    fn context_for(name: &str) -> TemplateContext {
        let project = ProjectName::new(name).unwrap();
        TemplateContext::new(&project, &ProjectConfig::default())
    }

    fn rendered(name: &str, path: &str) -> RenderedFile {
        let renderer = TemplateRenderer::new();
        renderer
            .render_catalog(&context_for(name))
            .unwrap()
            .into_iter()
            .find(|file| file.relative_path == PathBuf::from(path))
            .unwrap_or_else(|| panic!("{path} not rendered"))
    }

    #[test]
    fn test_catalog_paths() {
        let renderer = TemplateRenderer::new();
        let files = renderer.render_catalog(&context_for("my-project")).unwrap();

        let paths: Vec<PathBuf> = files.iter().map(|f| f.relative_path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("src/my_project/__init__.py"),
                PathBuf::from("src/my_project/main.py"),
                PathBuf::from("tests/__init__.py"),
                PathBuf::from("tests/test_main.py"),
                PathBuf::from("docs/index.md"),
                PathBuf::from("README.md"),
                PathBuf::from(".gitignore"),
                PathBuf::from("pyproject.toml"),
                PathBuf::from("requirements.in"),
            ]
        );
    }

    #[test]
    fn test_marker_files_are_empty() {
        let package_init = rendered("my-project", "src/my_project/__init__.py");
        let tests_init = rendered("my-project", "tests/__init__.py");
        assert!(package_init.contents.is_empty());
        assert!(tests_init.contents.is_empty());
    }

    #[test]
    fn test_main_module_has_one_function() {
        let main = rendered("my-project", "src/my_project/main.py").contents;
        assert_eq!(main.matches("def ").count(), 1);
        assert!(main.contains("def example_function(text: str) -> str:"));
        assert!(main.contains("return f\"Hello, {text}!\""));
    }

    #[test]
    fn test_test_module_imports_package() {
        let test = rendered("my-project", "tests/test_main.py").contents;
        assert!(test.contains("from my_project.main import example_function"));
        assert!(test.contains("assert example_function(\"World\") == \"Hello, World!\""));
    }

    #[test]
    fn test_pyproject_metadata() {
        let pyproject = rendered("my-project", "pyproject.toml").contents;
        assert!(pyproject.contains("name = \"my-project\""));
        assert!(pyproject.contains("version = \"0.1.0\""));
        assert!(pyproject.contains("requires-python = \">=3.8\""));
        assert!(pyproject.contains("package-dir = {\"\" = \"src\"}"));
        assert!(pyproject.contains("testpaths = [\"tests\"]"));
        assert!(pyproject.contains("authors = []"));
    }

    #[test]
    fn test_pyproject_is_valid_toml() {
        let project = ProjectName::new("quote\"d-name").unwrap();
        let mut metadata = ProjectConfig::default();
        metadata.description = "Says \"hi\" \\ waves".to_string();
        metadata.authors = vec![
            Author {
                name: "Jane Doe".to_string(),
                email: Some("jane@example.com".to_string()),
            },
            Author {
                name: "John Roe".to_string(),
                email: None,
            },
        ];

        let renderer = TemplateRenderer::new();
        let context = TemplateContext::new(&project, &metadata);
        let pyproject = renderer
            .render_catalog(&context)
            .unwrap()
            .into_iter()
            .find(|f| f.relative_path == PathBuf::from("pyproject.toml"))
            .unwrap();

        let parsed: toml::Table = toml::from_str(&pyproject.contents).unwrap();
        let project_table = parsed.get("project").and_then(|v| v.as_table()).unwrap();
        assert_eq!(
            project_table.get("name").and_then(|v| v.as_str()),
            Some("quote\"d-name")
        );
        assert_eq!(
            project_table.get("description").and_then(|v| v.as_str()),
            Some("Says \"hi\" \\ waves")
        );
        let authors = project_table
            .get("authors")
            .and_then(|v| v.as_array())
            .unwrap();
        assert_eq!(authors.len(), 2);
    }

    #[test]
    fn test_readme_mentions_names() {
        let readme = rendered("my-project", "README.md").contents;
        assert!(readme.starts_with("# my-project"));
        assert!(readme.contains("from my_project.main import example_function"));
    }

    #[test]
    fn test_docs_index_heading() {
        let index = rendered("my-project", "docs/index.md").contents;
        assert_eq!(index, "# my-project\n");
    }

    #[test]
    fn test_no_html_escaping() {
        let readme = rendered("a&b", "README.md").contents;
        assert!(readme.starts_with("# a&b"));
    }

    #[test]
    fn test_gitignore_covers_caches_and_venvs() {
        let gitignore = rendered("demo", ".gitignore").contents;
        for pattern in ["__pycache__/", ".venv/", "dist/", ".mypy_cache/", ".idea/"] {
            assert!(gitignore.contains(pattern), "missing {pattern}");
        }
    }

    #[test]
    fn test_requirements_has_no_active_dependency() {
        let requirements = rendered("demo", "requirements.in").contents;
        for line in requirements.lines() {
            assert!(line.trim().is_empty() || line.starts_with('#'), "{line}");
        }
    }

    #[test]
    fn test_quote_toml_escapes() {
        assert_eq!(quote_toml("plain"), "\"plain\"");
        assert_eq!(quote_toml("a\"b"), "\"a\\\"b\"");
        assert_eq!(quote_toml("line\nbreak"), "\"line\\nbreak\"");
        assert_eq!(quote_toml("\u{1}"), "\"\\u0001\"");
    }

    #[test]
    fn test_render_uses_supplied_body() {
        let renderer = TemplateRenderer::new();
        let context = context_for("demo");

        let extra = FileTemplate {
            path: "extra/{{package_name}}.txt",
            body: "hello {{project_name}}",
        };
        let file = renderer.render(&extra, &context).unwrap();
        assert_eq!(file.relative_path, PathBuf::from("extra/demo.txt"));
        assert_eq!(file.contents, "hello demo");

        // 与目录同路径的模板也使用自身内容
        let readme = FileTemplate {
            path: "README.md",
            body: "custom {{project_name}}",
        };
        let file = renderer.render(&readme, &context).unwrap();
        assert_eq!(file.contents, "custom demo");
    }

    #[test]
    fn test_unknown_variable_is_template_error() {
        let renderer = TemplateRenderer::new();
        let context = context_for("demo");

        let broken_body = FileTemplate {
            path: "docs/broken.md",
            body: "# {{missing}}",
        };
        match renderer.render(&broken_body, &context).unwrap_err() {
            ScaffoldError::Template(TemplateError::Render { name, message }) => {
                assert_eq!(name, "docs/broken.md");
                assert!(message.contains("missing"));
            }
            other => panic!("unexpected error: {other:?}"),
        }

        let broken_path = FileTemplate {
            path: "docs/{{missing}}",
            body: "",
        };
        let err = renderer.render(&broken_path, &context).unwrap_err();
        assert!(matches!(err, ScaffoldError::Template(_)));
    }
}
