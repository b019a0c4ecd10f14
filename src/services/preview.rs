//! Terminal preview of the page, driving the same state machines as the web UI.

use crate::core::config::Config;
use crate::core::content::{CharacterProfile, ContentRegistry, SectionEssay};
use crate::core::hero::{Direction, DisplayZone, HeroCarousel};
use crate::core::modal::{ModalContent, ModalPresenter};
use crate::core::quiz::{QuizPhase, QuizSession};
use crate::core::roster::{Category, CharacterCarousel, ALL_CATEGORY};
use crate::core::timer::{TimerDirective, TimerSlot};
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use inquire::{Confirm, Select};
use log::debug;
use std::fmt;
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

const TEXT_WIDTH: usize = 80;
const PROGRESS_REFRESH: Duration = Duration::from_millis(100);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuEntry {
    Slideshow,
    Characters,
    Essays,
    Quiz,
    Quit,
}

impl fmt::Display for MenuEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MenuEntry::Slideshow => "Hero slideshow",
            MenuEntry::Characters => "Characters",
            MenuEntry::Essays => "The Booker Prize",
            MenuEntry::Quiz => "Literary quiz",
            MenuEntry::Quit => "Quit",
        };
        f.write_str(label)
    }
}

pub async fn run(config: Config, registry: ContentRegistry) -> Result<()> {
    let mut modals = ModalPresenter::for_registry(&registry);
    let mut quiz = QuizSession::new(registry.quiz.clone())?;

    loop {
        let entries = vec![
            MenuEntry::Slideshow,
            MenuEntry::Characters,
            MenuEntry::Essays,
            MenuEntry::Quiz,
            MenuEntry::Quit,
        ];
        let Some(entry) = Select::new("Life of Pi", entries).prompt_skippable()? else {
            break;
        };
        match entry {
            MenuEntry::Slideshow => run_slideshow(&config, &registry).await?,
            MenuEntry::Characters => browse_characters(&config, &registry, &mut modals)?,
            MenuEntry::Essays => read_essays(&registry, &mut modals)?,
            MenuEntry::Quiz => take_quiz(&mut quiz)?,
            MenuEntry::Quit => break,
        }
    }
    Ok(())
}

// --- Hero slideshow ---

/// One line per slide, marked with its display zone.
pub fn format_slides(hero: &HeroCarousel, registry: &ContentRegistry) -> String {
    let mut out = String::new();
    for (i, slide) in registry.hero_slides.iter().enumerate() {
        let marker = match hero.zone_of(i) {
            DisplayZone::Active => ">>",
            DisplayZone::Next | DisplayZone::Prev => " +",
            DisplayZone::FarNext | DisplayZone::FarPrev => " .",
            DisplayZone::Hidden => "  ",
        };
        let zone = hero.zone_of(i).css_class();
        out.push_str(&format!("{} {:<8} {}\n", marker, zone, slide.title));
    }
    out.push_str(&format!(
        "{} / {:02} [{}]",
        hero.counter_label(),
        hero.total(),
        if hero.is_playing() { "playing" } else { "paused" }
    ));
    out
}

enum SlideCommand {
    Hero(Box<dyn FnOnce(&mut HeroCarousel) -> TimerDirective + Send>),
    Quit,
    Unknown,
}

fn parse_slide_command(line: &str) -> SlideCommand {
    let line = line.trim();
    match line {
        "n" | "next" => SlideCommand::Hero(Box::new(|h| h.advance(Direction::Forward))),
        "p" | "prev" => SlideCommand::Hero(Box::new(|h| h.advance(Direction::Backward))),
        "t" | "toggle" | "" => SlideCommand::Hero(Box::new(HeroCarousel::toggle_play)),
        "q" | "quit" => SlideCommand::Quit,
        _ => {
            if let Some(delta) = line.strip_prefix("swipe ").and_then(|d| d.trim().parse::<f64>().ok()) {
                return SlideCommand::Hero(Box::new(move |h| h.on_gesture(delta)));
            }
            match line.parse::<usize>() {
                Ok(n) if n > 0 => SlideCommand::Hero(Box::new(move |h| h.goto(n - 1))),
                _ => SlideCommand::Unknown,
            }
        }
    }
}

/// Whether the progress bar should count from zero again after `directive`.
fn restarts_period(directive: TimerDirective) -> bool {
    matches!(directive, TimerDirective::Restart(_))
}

/// Spawns a ticker that reports its generation on every period.
fn spawn_ticker(tx: mpsc::UnboundedSender<u64>, generation: u64, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval_at(Instant::now() + period, period);
        loop {
            interval.tick().await;
            if tx.send(generation).is_err() {
                break;
            }
        }
    })
}

async fn run_slideshow(config: &Config, registry: &ContentRegistry) -> Result<()> {
    let mut hero = HeroCarousel::new(
        registry.hero_slides.len(),
        config.hero_period(),
        config.gesture_threshold,
    );
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut timer: TimerSlot<JoinHandle<()>> = TimerSlot::new();
    // ticks from an aborted ticker may still be queued; only the live generation counts
    let mut generation = 0u64;
    let mut started = Instant::now();

    let period_ms = config.hero_rotation_ms;
    let pb = ProgressBar::new(period_ms);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    println!("Commands: n(ext), p(rev), <number>, t(oggle) or Enter, swipe <px>, q(uit)");
    pb.println(format_slides(&hero, registry));

    let apply = |directive: TimerDirective,
                     timer: &mut TimerSlot<JoinHandle<()>>,
                     generation: &mut u64| {
        if directive != TimerDirective::Unchanged {
            *generation += 1;
        }
        let live = *generation;
        timer.apply(directive, |period| Some(spawn_ticker(tx.clone(), live, period)));
    };
    apply(hero.start(), &mut timer, &mut generation);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut refresh = tokio::time::interval(PROGRESS_REFRESH);

    loop {
        tokio::select! {
            Some(tick) = rx.recv() => {
                if tick != generation {
                    debug!("dropping stale tick from generation {}", tick);
                    continue;
                }
                let directive = hero.tick();
                apply(directive, &mut timer, &mut generation);
                started = Instant::now();
                pb.println(format_slides(&hero, registry));
            }
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                match parse_slide_command(&line) {
                    SlideCommand::Hero(op) => {
                        let before = (hero.current(), hero.is_playing());
                        let directive = op(&mut hero);
                        apply(directive, &mut timer, &mut generation);
                        if restarts_period(directive) {
                            started = Instant::now();
                        }
                        if before != (hero.current(), hero.is_playing()) {
                            pb.println(format_slides(&hero, registry));
                        }
                    }
                    SlideCommand::Quit => break,
                    SlideCommand::Unknown => pb.println(format!("Unknown command: {}", line.trim())),
                }
            }
            _ = refresh.tick() => {
                if hero.is_playing() {
                    let elapsed = started.elapsed().as_millis() as u64;
                    pb.set_position(elapsed.min(period_ms));
                    pb.set_message(hero.counter_label());
                } else {
                    pb.set_position(0);
                    pb.set_message("paused");
                }
            }
        }
    }

    timer.clear();
    pb.finish_and_clear();
    Ok(())
}

// --- Characters ---

pub fn format_character(profile: &CharacterProfile) -> String {
    let mut out = format!("{}\n{}\n\nCharacter Overview\n  {}\n\nKey Characteristics\n", profile.name, profile.role, profile.description);
    for c in &profile.characteristics {
        out.push_str(&format!("  - {}\n", c));
    }
    out.push_str(&format!("\nSymbolic Significance\n  {}\n", profile.symbolism));
    out.push_str(&format!("\nLiterary Analysis\n  {}\n", profile.analysis));
    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RosterAction {
    Next,
    Prev,
    Filter,
    Jump,
    ReadMore,
    Back,
}

impl fmt::Display for RosterAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RosterAction::Next => "Next",
            RosterAction::Prev => "Previous",
            RosterAction::Filter => "Filter by category",
            RosterAction::Jump => "Jump to character",
            RosterAction::ReadMore => "Read more",
            RosterAction::Back => "Back",
        };
        f.write_str(label)
    }
}

fn browse_characters(config: &Config, registry: &ContentRegistry, modals: &mut ModalPresenter) -> Result<()> {
    let mut roster = CharacterCarousel::new(
        registry.characters.iter().map(|c| c.category.clone()).collect(),
        config.character_period(),
    );
    // the prompt keeps focus for as long as it is open, so auto-play stays paused
    roster.pointer_enter();

    loop {
        let Some(current) = registry.characters.get(roster.current()) else {
            println!("No characters to show.");
            return Ok(());
        };
        println!(
            "\n[{}] {} - {}\n  {}",
            roster.filter().as_str(),
            current.name,
            current.role,
            current.description
        );

        let actions = vec![
            RosterAction::Next,
            RosterAction::Prev,
            RosterAction::Filter,
            RosterAction::Jump,
            RosterAction::ReadMore,
            RosterAction::Back,
        ];
        let Some(action) = Select::new("Characters", actions).prompt_skippable()? else {
            return Ok(());
        };
        match action {
            RosterAction::Next => {
                roster.next();
            }
            RosterAction::Prev => {
                roster.prev();
            }
            RosterAction::Filter => {
                let mut tags = vec![ALL_CATEGORY.to_string()];
                tags.extend(registry.categories());
                if let Some(tag) = Select::new("Category", tags).prompt_skippable()? {
                    roster.set_filter(Category::parse(&tag));
                }
            }
            RosterAction::Jump => {
                let names: Vec<String> = registry.characters.iter().map(|c| c.name.clone()).collect();
                if let Some(name) = Select::new("Character", names.clone()).prompt_skippable()? {
                    if let Some(index) = names.iter().position(|n| *n == name) {
                        roster.select_thumbnail(index);
                    }
                }
            }
            RosterAction::ReadMore => {
                if modals.open_character(&current.key, registry) {
                    show_modal(modals)?;
                }
            }
            RosterAction::Back => return Ok(()),
        }
    }
}

// --- Essays ---

pub fn format_section(essay: &SectionEssay, width: usize) -> Result<String> {
    let mut out = format!("{}\n{}\n\n", essay.title, essay.subtitle);
    out.push_str(&html2text::from_read(essay.content.as_bytes(), width)?);
    if let Some(info) = &essay.additional_info {
        out.push_str(&format!("\nAdditional Information\n  {}\n", info));
    }
    if let Some(impact) = &essay.impact {
        out.push_str(&format!("\nImpact on Literature\n  {}\n", impact));
    }
    Ok(out)
}

fn read_essays(registry: &ContentRegistry, modals: &mut ModalPresenter) -> Result<()> {
    let titles: Vec<String> = registry.sections.iter().map(|s| s.title.clone()).collect();
    while let Some(title) = Select::new("Read about", titles.clone()).prompt_skippable()? {
        let Some(essay) = registry.sections.iter().find(|s| s.title == title) else {
            continue;
        };
        if modals.open_section(&essay.key, registry) {
            show_modal(modals)?;
        }
    }
    Ok(())
}

fn show_modal(modals: &mut ModalPresenter) -> Result<()> {
    let text = match modals.content() {
        Some(ModalContent::Character(profile)) => format_character(profile),
        Some(ModalContent::Section(essay)) => format_section(essay, TEXT_WIDTH)?,
        None => String::new(),
    };
    println!("\n{}", text);
    Confirm::new("Close?").with_default(true).prompt_skippable()?;
    modals.close_all();
    Ok(())
}

// --- Quiz ---

#[derive(Debug, Clone, PartialEq, Eq)]
enum QuizChoice {
    Answer { index: usize, text: String, selected: bool },
    Prev,
    Next(&'static str),
}

impl fmt::Display for QuizChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizChoice::Answer { text, selected, .. } => {
                write!(f, "{} {}", if *selected { "[x]" } else { "[ ]" }, text)
            }
            QuizChoice::Prev => f.write_str("<- Previous"),
            QuizChoice::Next(label) => write!(f, "-> {}", label),
        }
    }
}

fn quiz_choices(quiz: &QuizSession) -> Vec<QuizChoice> {
    let mut choices: Vec<QuizChoice> = quiz
        .current_question()
        .options
        .iter()
        .enumerate()
        .map(|(index, text)| QuizChoice::Answer {
            index,
            text: text.clone(),
            selected: quiz.is_selected(index),
        })
        .collect();
    if quiz.shows_prev() {
        choices.push(QuizChoice::Prev);
    }
    choices.push(QuizChoice::Next(quiz.next_label()));
    choices
}

fn take_quiz(quiz: &mut QuizSession) -> Result<()> {
    loop {
        if let QuizPhase::Finished(result) = quiz.phase() {
            println!("\nScore: {}\n{}", result.score_label(), result.tier().message());
            let again = Confirm::new("Try again?").with_default(false).prompt_skippable()?;
            if again != Some(true) {
                return Ok(());
            }
            quiz.restart();
            continue;
        }

        let heading = format!("{} ({:.0}%)", quiz.question_heading(), quiz.progress_percent());
        let choices = quiz_choices(quiz);
        let cursor = choices.len() - 1;
        let Some(choice) = Select::new(&heading, choices)
            .with_starting_cursor(cursor)
            .prompt_skippable()?
        else {
            return Ok(());
        };
        match choice {
            QuizChoice::Answer { index, .. } => quiz.select_answer(index),
            QuizChoice::Prev => quiz.prev_question(),
            QuizChoice::Next(_) => quiz.next_question(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_slides_marks_active_slide() -> Result<()> {
        let registry = ContentRegistry::builtin()?;
        let mut hero = HeroCarousel::new(registry.hero_slides.len(), Duration::from_secs(5), 50.0);
        hero.goto(2);
        let text = format_slides(&hero, &registry);
        assert!(text.contains(">> active   The Journey"));
        assert!(text.contains(" + next     The Booker Prize"));
        assert!(text.ends_with("03 / 05 [playing]"));
        Ok(())
    }

    #[test]
    fn test_parse_slide_commands() {
        let mut hero = HeroCarousel::new(5, Duration::from_secs(5), 50.0);
        for (line, expected) in [("n", 1), ("p", 0), ("4", 3), ("swipe -80", 2), ("swipe 10", 2)] {
            match parse_slide_command(line) {
                SlideCommand::Hero(op) => {
                    op(&mut hero);
                }
                _ => panic!("'{}' should drive the hero", line),
            }
            assert_eq!(hero.current(), expected, "after '{}'", line);
        }
        assert!(matches!(parse_slide_command("q"), SlideCommand::Quit));
        assert!(matches!(parse_slide_command("0"), SlideCommand::Unknown));
        assert!(matches!(parse_slide_command("fly"), SlideCommand::Unknown));
    }

    #[test]
    fn test_jump_to_current_slide_restarts_progress() {
        let mut hero = HeroCarousel::new(5, Duration::from_secs(5), 50.0);
        hero.goto(2);
        let directive = hero.goto(2);
        assert_eq!(hero.current(), 2);
        assert!(restarts_period(directive));

        assert!(!restarts_period(hero.on_gesture(10.0)));
        assert!(!restarts_period(hero.toggle_play()));
        assert!(!restarts_period(hero.goto(3)));
        assert!(restarts_period(hero.toggle_play()));
    }

    #[tokio::test]
    async fn test_aborted_ticker_stops_sending() -> Result<()> {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut timer: TimerSlot<JoinHandle<()>> = TimerSlot::new();
        timer.apply(TimerDirective::Restart(Duration::from_millis(10)), |p| {
            Some(spawn_ticker(tx.clone(), 1, p))
        });
        assert_eq!(rx.recv().await, Some(1));

        timer.apply(TimerDirective::Restart(Duration::from_millis(10)), |p| {
            Some(spawn_ticker(tx.clone(), 2, p))
        });
        // drain anything the first ticker queued before it was aborted
        let mut latest = 0;
        while latest != 2 {
            latest = rx.recv().await.unwrap_or(2);
        }
        timer.clear();
        tokio::time::sleep(Duration::from_millis(30)).await;
        while let Ok(tick) = rx.try_recv() {
            assert_eq!(tick, 2);
        }
        Ok(())
    }

    #[test]
    fn test_format_character() -> Result<()> {
        let registry = ContentRegistry::builtin()?;
        let text = format_character(registry.character("orange").expect("orange"));
        assert!(text.starts_with("Orange Juice\nOrangutan - The Maternal Figure"));
        assert!(text.contains("  - Arrives on a bundle of bananas\n"));
        Ok(())
    }

    #[test]
    fn test_format_section_renders_html_as_text() -> Result<()> {
        let registry = ContentRegistry::builtin()?;
        let text = format_section(registry.section("booker-intro").expect("intro"), TEXT_WIDTH)?;
        assert!(text.contains("History and Evolution"));
        assert!(!text.contains("<li>"));
        assert!(text.contains("Impact on Literature"));
        Ok(())
    }

    #[test]
    fn test_quiz_choices_follow_position() -> Result<()> {
        let registry = ContentRegistry::builtin()?;
        let mut quiz = QuizSession::new(registry.quiz)?;
        let first = quiz_choices(&quiz);
        assert_eq!(first.len(), 5);
        assert_eq!(first.last(), Some(&QuizChoice::Next("Next Question")));

        quiz.select_answer(1);
        assert_eq!(quiz_choices(&quiz)[1].to_string(), "[x] 2002");

        while quiz.pointer() < 9 {
            quiz.next_question();
        }
        let last = quiz_choices(&quiz);
        assert_eq!(last.len(), 6);
        assert_eq!(last[4], QuizChoice::Prev);
        assert_eq!(last[5], QuizChoice::Next("See Results"));
        Ok(())
    }
}
