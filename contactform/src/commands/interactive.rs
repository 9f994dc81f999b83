use anyhow::{bail, Context};
use contactform_core_contact_contracts::ContactFormService;
use contactform_models::contact::{FormField, SubmissionStatus};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};

/// Runs the contact form as a line based dialog until the user quits or the
/// input ends.
pub async fn run<R, W>(
    form: &mut impl ContactFormService,
    input: R,
    output: &mut W,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut dialog = Dialog {
        lines: input.lines(),
        output,
    };

    loop {
        let proceed = match form.status() {
            SubmissionStatus::Idle => dialog.edit(form).await?,
            SubmissionStatus::Succeeded => dialog.success(form).await?,
            SubmissionStatus::Submitting => bail!("A submission is still in progress"),
        };
        if !proceed {
            return Ok(());
        }
    }
}

struct Dialog<'a, R, W> {
    lines: Lines<R>,
    output: &'a mut W,
}

enum Event {
    Tick(u64),
    Line(Option<String>),
}

impl<R, W> Dialog<'_, R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    /// Asks for missing or rejected fields and submits the form. Returns
    /// `false` if the user wants to leave.
    async fn edit(&mut self, form: &mut impl ContactFormService) -> anyhow::Result<bool> {
        let pending = match form.error().and_then(|err| err.field) {
            Some(field) => vec![field],
            None => FormField::ALL
                .into_iter()
                .filter(|&field| form.fields().get(field).trim().is_empty())
                .collect(),
        };

        for field in pending {
            let Some(value) = self.prompt(&format!("{}: ", label(field))).await? else {
                return Ok(false);
            };
            form.update_field(field, value);
        }

        if form.submit_form().await.is_ok() {
            return Ok(true);
        }

        let Some(error) = form.error().copied() else {
            return Ok(true);
        };
        self.say(&format!("{error}\n")).await?;

        if error.field.is_none() {
            let answer = self
                .prompt("Press enter to try again or type 'quit' to exit: ")
                .await?;
            return Ok(answer.is_some_and(|answer| !is_quit(&answer)));
        }

        Ok(true)
    }

    /// Shows the success view with the cooldown countdown. Returns `true`
    /// once the form has been reset for another message.
    async fn success(&mut self, form: &mut impl ContactFormService) -> anyhow::Result<bool> {
        self.say("Thank you! Your message has been sent.\n").await?;
        self.say(&countdown(form.cooldown_state().remaining_seconds))
            .await?;
        self.say("Type 'new' to write another message or 'quit' to exit.\n")
            .await?;

        loop {
            let event = tokio::select! {
                remaining = form.cooldown_tick() => Event::Tick(remaining),
                line = self.lines.next_line() => {
                    Event::Line(line.context("Failed to read from input")?)
                }
            };

            match event {
                Event::Tick(remaining) => self.say(&countdown(remaining)).await?,
                Event::Line(None) => return Ok(false),
                Event::Line(Some(line)) if is_quit(&line) => return Ok(false),
                Event::Line(Some(line)) if matches!(line.trim(), "new" | "reset") => {
                    if form.reset_form() {
                        return Ok(true);
                    }
                    let remaining = form.cooldown_state().remaining_seconds;
                    self.say(&format!(
                        "Please wait {remaining} more seconds before writing another message.\n"
                    ))
                    .await?;
                }
                Event::Line(Some(_)) => {
                    self.say("Type 'new' to write another message or 'quit' to exit.\n")
                        .await?
                }
            }
        }
    }

    async fn prompt(&mut self, prompt: &str) -> anyhow::Result<Option<String>> {
        self.say(prompt).await?;
        self.lines
            .next_line()
            .await
            .context("Failed to read from input")
    }

    async fn say(&mut self, text: &str) -> anyhow::Result<()> {
        self.output
            .write_all(text.as_bytes())
            .await
            .context("Failed to write to output")?;
        self.output
            .flush()
            .await
            .context("Failed to write to output")
    }
}

fn label(field: FormField) -> &'static str {
    match field {
        FormField::Name => "Name",
        FormField::Email => "Email",
        FormField::Phone => "Phone",
        FormField::Message => "Message",
    }
}

fn countdown(remaining: u64) -> String {
    match remaining {
        0 => "You can send another message now.\n".into(),
        1 => "You can send another message in 1 second.\n".into(),
        n => format!("You can send another message in {n} seconds.\n"),
    }
}

fn is_quit(line: &str) -> bool {
    matches!(line.trim(), "quit" | "q" | "exit")
}
