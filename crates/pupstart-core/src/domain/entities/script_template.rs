//! Structured description of the generated example script.
//!
//! The example is modelled as data: an import, launch options, and a
//! sequence of steps wrapped in an async `main` with a failure handler.
//! Variant differences (bundled vs core, TypeScript vs plain module) live
//! in the fields, and [`ExampleScript::render`] is the only place that
//! turns them into source text.
//!
//! ```text
//! import <binding> from '<package>';
//!
//! async function main()[: Promise<void>] {
//!   const browser = await <binding>.launch({ headless: true[, executablePath] });
//!   <steps…>
//! }
//!
//! main().catch(<failure handler>);
//! ```

use serde::Serialize;

use crate::domain::value_objects::{BrowserLibrary, ScriptFlavor};

/// Page the example navigates to.
pub const EXAMPLE_URL: &str = "https://example.com";

const INDENT: &str = "  ";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExampleScript {
    pub flavor: ScriptFlavor,
    pub import: Import,
    pub launch: LaunchOptions,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Import {
    pub binding: &'static str,
    pub module: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchOptions {
    pub headless: bool,
    /// Environment variable the script reads when it *runs* to find the
    /// browser executable. The scaffolder never reads it.
    pub executable_path_env: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum Step {
    NewPage,
    Goto { url: &'static str },
    LogTitle,
    CloseBrowser,
}

impl ExampleScript {
    /// The canonical example: open a page, print its title, close.
    pub fn for_variant(flavor: ScriptFlavor, library: BrowserLibrary) -> Self {
        Self {
            flavor,
            import: Import {
                binding: "puppeteer",
                module: library.package_name(),
            },
            launch: LaunchOptions {
                headless: true,
                executable_path_env: library
                    .requires_executable_path()
                    .then_some(BrowserLibrary::EXECUTABLE_PATH_ENV),
            },
            steps: vec![
                Step::NewPage,
                Step::Goto { url: EXAMPLE_URL },
                Step::LogTitle,
                Step::CloseBrowser,
            ],
        }
    }

    pub fn render(&self) -> String {
        let typed = matches!(self.flavor, ScriptFlavor::TypeScript);
        let mut lines: Vec<String> = Vec::new();

        lines.push(format!(
            "import {} from '{}';",
            self.import.binding, self.import.module
        ));
        lines.push(String::new());

        lines.push(if typed {
            "async function main(): Promise<void> {".to_string()
        } else {
            "async function main() {".to_string()
        });

        lines.push(format!(
            "{INDENT}const browser = await {}.launch({{",
            self.import.binding
        ));
        lines.push(format!("{INDENT}{INDENT}headless: {},", self.launch.headless));
        if let Some(var) = self.launch.executable_path_env {
            lines.push(format!("{INDENT}{INDENT}executablePath: process.env.{var},"));
        }
        lines.push(format!("{INDENT}}});"));
        lines.push(String::new());

        for step in &self.steps {
            lines.push(format!("{INDENT}{}", step.render()));
        }
        lines.push("}".to_string());
        lines.push(String::new());

        let param = if typed { "(error: unknown)" } else { "(error)" };
        lines.push(format!("main().catch({param} => {{"));
        lines.push(format!("{INDENT}console.error(error);"));
        lines.push(format!("{INDENT}process.exit(1);"));
        lines.push("});".to_string());

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }
}

impl Step {
    fn render(&self) -> String {
        match self {
            Self::NewPage => "const page = await browser.newPage();".to_string(),
            Self::Goto { url } => format!("await page.goto('{url}');"),
            Self::LogTitle => "console.log(await page.title());".to_string(),
            Self::CloseBrowser => "await browser.close();".to_string(),
        }
    }
}
