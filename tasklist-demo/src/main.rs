mod terminal;
mod view;

use std::fs::File;
use std::time::Duration;

use crossterm::event::{Event as CrosstermEvent, KeyCode, KeyEventKind, MouseButton, MouseEventKind};
use simplelog::{Config, LevelFilter, WriteLogger};
use tasklist::markup::{design_system_provider, simple_tag, task_item, task_list, tree_item, tree_view};
use tasklist::{Host, HostError, Key, Modifiers, NodeId};

use terminal::Terminal;

fn build(host: &mut Host) -> Result<NodeId, HostError> {
    let root = host.root();
    host.mount(
        root,
        design_system_provider()
            .attr("neutral-base-color", "#3366cc")
            .child(simple_tag("Today"))
            .child(
                task_list()
                    .attr("aria-label", "Tasks")
                    .child(task_item("Water the plants"))
                    .child(task_item("File the expense report").flag("disabled"))
                    .child(
                        task_item("Plan the trip")
                            .child(task_item("Book train tickets"))
                            .child(task_item("Reserve a hotel").flag("selected"))
                            .child(task_item("Pack")),
                    )
                    .child(task_item("Call the dentist")),
            )
            .child(
                tree_view()
                    .attr("aria-label", "Projects")
                    .child(
                        tree_item("listdom")
                            .flag("expanded")
                            .child(tree_item("document.rs"))
                            .child(tree_item("query.rs")),
                    )
                    .child(
                        tree_item("tasklist")
                            .child(tree_item("host.rs"))
                            .child(tree_item("widgets")),
                    ),
            ),
    )
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut host = Host::new();
    build(&mut host)?;
    host.focus_next();

    let mut term = Terminal::new()?;
    let mut status = String::from("ready");
    let mut lines = view::lines(&host, &status);
    term.draw(&lines)?;

    loop {
        let mut dirty = false;
        for event in term.poll(Some(Duration::from_millis(250)))? {
            match event {
                CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                        return Ok(());
                    }
                    let outcome = host.key_down(Key::from(key.code), Modifiers::from(key.modifiers));
                    log::debug!("[demo] {:?} -> {outcome:?}", key.code);
                    dirty = true;
                }
                CrosstermEvent::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
                    if let Some(node) = lines.get(mouse.row as usize).and_then(|line| line.node) {
                        host.click(node);
                        dirty = true;
                    }
                }
                CrosstermEvent::Resize(..) => dirty = true,
                _ => {}
            }
        }

        let notifications = host.take_notifications();
        if let Some(last) = notifications.last() {
            status = format!("{} from {}", last.name, last.target);
        }

        if dirty {
            lines = view::lines(&host, &status);
            term.draw(&lines)?;
        }
    }
}

fn main() {
    let log_file = File::create("tasklist-demo.log").expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
    }
}
