use maud::{DOCTYPE, Markup, PreEscaped, html};

/// Module path the browser loads to boot the wasm shell.
const SHELL_MODULE_PATH: &str = "/assets/pipeforge_web_shell.js";

/// Renders the studio page. The six ids are the contract the wasm shell
/// binds against at page-ready; renaming one is a breaking change.
pub fn render_studio_page() -> String {
    let markup = html! {
        (DOCTYPE)
        html lang="zh-CN" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { "Pipeforge Studio" }
                style { (PreEscaped(styles())) }
                script type="module" { (PreEscaped(shell_bootstrap())) }
            }
            body {
                div class="pf-app" {
                    (topbar())
                    main class="pf-main" {
                        section class="pf-card pf-guide" {
                            h2 { "工具库说明" }
                            pre id="tool-guide" class="pf-guide-body" {}
                        }
                        section class="pf-card pf-workbench" {
                            label for="task-description" { "任务描述" }
                            textarea id="task-description" rows="6"
                                placeholder="描述要生成的数据处理流水线，例如：从MySQL读取订单表，清洗后写入Redis" {}
                            div class="pf-actions" {
                                button id="generate-btn" type="button" class="pf-btn primary" { "生成代码" }
                                button id="copy-btn" type="button" class="pf-btn" { "复制代码" }
                                button id="download-btn" type="button" class="pf-btn" { "下载代码" }
                            }
                            label for="code-output" { "生成结果" }
                            textarea id="code-output" rows="18" spellcheck="false" {}
                        }
                    }
                }
            }
        }
    };
    markup.into_string()
}

fn topbar() -> Markup {
    html! {
        header class="pf-topbar" {
            div class="pf-brand" { "Pipeforge Studio" }
            span class="pf-tagline" { "数据处理流水线代码生成" }
        }
    }
}

fn shell_bootstrap() -> String {
    format!("import init from \"{SHELL_MODULE_PATH}\";\ninit();")
}

fn styles() -> &'static str {
    r#"
:root {
  color-scheme: dark;
  --bg: #0a0d16;
  --panel: rgba(14, 19, 33, 0.88);
  --panel-border: rgba(120, 146, 188, 0.26);
  --text: #e7edfa;
  --muted: #8d9ec2;
  --accent: #38b2ff;
}
* { box-sizing: border-box; }
html, body { margin: 0; min-height: 100%; background: var(--bg); color: var(--text); }
body {
  font-family: "IBM Plex Sans", "SF Pro Text", -apple-system, BlinkMacSystemFont, sans-serif;
  -webkit-font-smoothing: antialiased;
}
.pf-app { min-height: 100vh; display: flex; flex-direction: column; }
.pf-topbar {
  display: flex;
  gap: 0.8rem;
  align-items: baseline;
  padding: 0.85rem 1.1rem;
  border-bottom: 1px solid var(--panel-border);
  background: rgba(8, 12, 22, 0.75);
}
.pf-brand { font-weight: 700; letter-spacing: 0.05em; text-transform: uppercase; font-size: 0.82rem; }
.pf-tagline { color: var(--muted); font-size: 0.84rem; }
.pf-main {
  display: grid;
  grid-template-columns: minmax(280px, 380px) 1fr;
  gap: 1rem;
  padding: 1rem;
  width: 100%;
  max-width: 1320px;
  margin: 0 auto;
}
.pf-card {
  border: 1px solid var(--panel-border);
  border-radius: 12px;
  background: var(--panel);
  padding: 1rem;
}
.pf-card h2 { margin: 0 0 0.6rem; font-size: 1rem; }
.pf-guide-body {
  margin: 0;
  white-space: pre-wrap;
  word-break: break-word;
  max-height: 70vh;
  overflow: auto;
  color: var(--muted);
  font-size: 0.86rem;
  line-height: 1.5;
  font-family: "IBM Plex Mono", ui-monospace, SFMono-Regular, Menlo, monospace;
}
label {
  display: block;
  margin: 0.6rem 0 0.3rem;
  font-size: 0.8rem;
  color: var(--muted);
  text-transform: uppercase;
  letter-spacing: 0.05em;
}
textarea {
  width: 100%;
  border: 1px solid rgba(120, 150, 200, 0.35);
  border-radius: 10px;
  padding: 0.55rem 0.65rem;
  background: rgba(6, 12, 24, 0.95);
  color: #eef4ff;
  font: inherit;
}
#code-output {
  font-family: "IBM Plex Mono", ui-monospace, SFMono-Regular, Menlo, monospace;
  font-size: 0.9rem;
  line-height: 1.45;
}
textarea:focus { outline: none; border-color: var(--accent); }
.pf-actions { display: flex; gap: 0.55rem; margin: 0.75rem 0; }
.pf-btn {
  appearance: none;
  border: 1px solid rgba(108, 130, 170, 0.45);
  border-radius: 10px;
  background: rgba(17, 28, 50, 0.9);
  color: #dcebff;
  padding: 0.5rem 0.8rem;
  font-size: 0.9rem;
  cursor: pointer;
}
.pf-btn:hover { border-color: rgba(110, 180, 240, 0.7); }
.pf-btn.primary { background: linear-gradient(180deg, #1a6ea5 0%, #0f4f7b 100%); border-color: rgba(80, 185, 255, 0.6); }
@media (max-width: 900px) {
  .pf-main { grid-template-columns: 1fr; }
}
"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn studio_page_renders_all_bound_element_ids() {
        let html = render_studio_page();
        for id in [
            "generate-btn",
            "code-output",
            "copy-btn",
            "download-btn",
            "task-description",
            "tool-guide",
        ] {
            assert!(html.contains(&format!("id=\"{id}\"")), "missing #{id}");
        }
    }

    #[test]
    fn studio_page_boots_the_wasm_shell_module() {
        let html = render_studio_page();
        assert!(html.contains("type=\"module\""));
        assert!(html.contains(SHELL_MODULE_PATH));
    }
}
