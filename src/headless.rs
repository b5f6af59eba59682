// Headless mode - print the transcript as plain text
//
// Used when the TUI is disabled. Committed lines are printed once, in order,
// as they leave the splitter; the trailing open line is printed when the
// source closes so a final prompt is not lost.

use crate::config::Config;
use crate::interpret::{handlers, HandlerRegistry, Interpreter, TooltipAliases};
use crate::render;
use crate::session::{Action, Session};
use crate::theme::{Theme, ThemeConfig};
use anyhow::Result;
use std::io::Write;
use tokio::sync::mpsc;

/// Prints committed transcript lines to a writer
pub struct Printer<W: Write> {
    session: Session,
    registry: HandlerRegistry,
    aliases: TooltipAliases,
    theme: Theme,
    /// Committed lines printed so far, counting evicted ones
    printed: usize,
    out: W,
}

impl<W: Write> Printer<W> {
    pub fn new(config: &Config, out: W) -> Self {
        let theme_config = ThemeConfig {
            use_theme_background: config.use_theme_background,
        };
        let mut theme = Theme::by_name_with_config(&config.theme, &theme_config);
        theme.palette = theme
            .palette
            .with_indexed(config.terminal.indexed_colors.resolver());

        Self {
            session: Session::new(config.terminal.max_lines, config.terminal.echo_newline),
            registry: handlers::standard(),
            aliases: TooltipAliases::new(config.tooltips.clone()),
            theme,
            printed: 0,
            out,
        }
    }

    /// Apply an action and print any lines it committed
    pub fn apply(&mut self, action: Action) -> Result<()> {
        match &action {
            Action::Connected => tracing::info!("Connected"),
            Action::Disconnected => tracing::info!("Disconnected"),
            _ => {}
        }
        self.session.apply(action);

        let buffer = self.session.buffer();
        let committed = buffer.evicted() + buffer.len();
        // Lines evicted before we saw them are gone; start at the oldest kept
        let start = self.printed.max(buffer.evicted()) - buffer.evicted();

        let interpreter = Interpreter::new(&self.registry, &self.theme.palette, &self.aliases);
        for line in buffer.iter().skip(start) {
            let text = render::plain_text(&interpreter.interpret_line(line));
            writeln!(self.out, "{}", text)?;
        }
        self.printed = committed;
        self.out.flush()?;
        Ok(())
    }

    /// Print the open line, if any, without a trailing newline
    pub fn finish(&mut self) -> Result<()> {
        if let Some(line) = self.session.open_line() {
            let interpreter =
                Interpreter::new(&self.registry, &self.theme.palette, &self.aliases);
            let text = render::plain_text(&interpreter.interpret_line(line));
            write!(self.out, "{}", text)?;
        }
        self.out.flush()?;
        Ok(())
    }

    #[cfg(test)]
    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Print actions until the source closes or Ctrl+C is pressed
pub async fn run_headless(mut action_rx: mpsc::Receiver<Action>, config: &Config) -> Result<()> {
    let stdout = std::io::stdout();
    let mut printer = Printer::new(config, stdout.lock());

    loop {
        tokio::select! {
            action = action_rx.recv() => match action {
                Some(action) => printer.apply(action)?,
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Interrupted");
                break;
            }
        }
    }

    printer.finish()
}
