use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, List, ListItem, ListState, Paragraph, Tabs, Wrap};
use ratatui::Frame;

use crate::models::{Article, Topic};
use crate::pages::{CommentSection, HomeFocus, HomePage, InsightPanel};

use super::widgets::{draw_spinner, skeleton};
use super::Palette;

pub fn draw(frame: &mut Frame, area: Rect, palette: &Palette, home: &HomePage, ticks: u64) {
    let [tabs_area, body] =
        Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(area);
    draw_topics(frame, tabs_area, palette, home.topic());

    match home.open_article() {
        Some(article) => {
            let [list, detail] =
                Layout::horizontal([Constraint::Percentage(38), Constraint::Percentage(62)])
                    .areas(body);
            draw_articles(frame, list, palette, home);
            draw_detail(frame, detail, palette, home, article, ticks);
        }
        None => draw_articles(frame, body, palette, home),
    }
}

fn draw_topics(frame: &mut Frame, area: Rect, palette: &Palette, topic: Topic) {
    let tabs = Tabs::new(Topic::ALL.iter().map(|t| t.label()))
        .select(topic.index())
        .style(palette.muted())
        .highlight_style(palette.highlight())
        .divider(Span::styled("│", palette.muted()));
    frame.render_widget(tabs, area);
}

fn draw_articles(frame: &mut Frame, area: Rect, palette: &Palette, home: &HomePage) {
    let focused = home.focus() == HomeFocus::Articles;
    let block = Block::bordered()
        .border_style(palette.border(focused))
        .title(format!(" {} News ", home.topic().label()));

    if home.is_loading() {
        frame.render_widget(
            Paragraph::new(skeleton(area.height as usize / 2, area.width, palette)).block(block),
            area,
        );
        return;
    }
    if home.articles().is_empty() {
        frame.render_widget(
            Paragraph::new(Line::styled("No articles found for this topic.", palette.muted()))
                .block(block),
            area,
        );
        return;
    }

    let items: Vec<ListItem> = home.articles().iter().map(|a| article_item(a, palette)).collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(palette.highlight())
        .highlight_symbol("▌ ");
    let mut state = ListState::default().with_selected(Some(home.selected()));
    frame.render_stateful_widget(list, area, &mut state);
}

fn article_item<'a>(article: &'a Article, palette: &Palette) -> ListItem<'a> {
    let mut meta = vec![Span::styled(article.source.as_str(), palette.muted())];
    if let Some(published) = article.published() {
        meta.push(Span::styled(
            format!(" · {}", published.format("%b %d, %H:%M")),
            palette.muted(),
        ));
    }
    if let Some(sentiment) = &article.sentiment {
        meta.push(Span::raw(" "));
        meta.push(Span::styled(sentiment.label.label(), palette.sentiment(sentiment.label)));
    }
    ListItem::new(vec![
        Line::styled(article.title.as_str(), palette.title()),
        Line::from(meta),
    ])
}

fn draw_detail(
    frame: &mut Frame,
    area: Rect,
    palette: &Palette,
    home: &HomePage,
    article: &Article,
    ticks: u64,
) {
    let [content, comments] =
        Layout::vertical([Constraint::Percentage(60), Constraint::Percentage(40)]).areas(area);

    let block = Block::bordered()
        .border_style(palette.border(false))
        .title(" Article ");
    let inner_width = content.width.saturating_sub(2) as usize;

    let mut lines: Vec<Line> = Vec::new();
    for row in textwrap::wrap(&article.title, inner_width.max(10)) {
        lines.push(Line::styled(row.into_owned(), palette.title()));
    }
    lines.push(Line::styled(
        format!("{} · {}", article.source, article.url),
        palette.muted(),
    ));
    lines.push(Line::from(""));
    lines.extend(insight_lines(&home.insight, palette, inner_width, ticks));
    lines.push(Line::from(""));
    if let Some(body) = article.body_text(inner_width) {
        lines.extend(body.lines().map(|l| Line::from(l.to_string())));
    }
    lines.push(Line::from(""));
    lines.push(Line::styled(
        "b bookmark · l read later · o open in browser · Esc close",
        palette.muted(),
    ));

    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: false }).block(block),
        content,
    );
    draw_comments(frame, comments, palette, &home.comments, home.focus(), ticks);
}

fn insight_lines(
    insight: &InsightPanel,
    palette: &Palette,
    width: usize,
    ticks: u64,
) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    let mut sentiment = vec![Span::styled("Sentiment: ", palette.muted())];
    match (&insight.sentiment, &insight.sentiment_error) {
        (Some(data), _) => sentiment.push(Span::styled(
            format!("{} ({:+.2})", data.label.label(), data.score),
            palette.sentiment(data.label),
        )),
        (None, Some(err)) => sentiment.push(Span::styled(err.clone(), palette.error())),
        (None, None) if insight.is_loading() => {
            sentiment.push(Span::styled(super::widgets::spinner_frame(ticks), palette.muted()))
        }
        (None, None) => {}
    }
    lines.push(Line::from(sentiment));

    match (&insight.summary, &insight.summary_error) {
        (Some(summary), _) => {
            lines.push(Line::styled(
                format!("Summary ({})", summary.source.label()),
                palette.muted(),
            ));
            for row in textwrap::wrap(&summary.summary, width.max(10)) {
                lines.push(Line::from(row.into_owned()));
            }
            if summary.source.is_fallback() {
                lines.push(Line::styled(
                    "Full text unavailable for this source.",
                    palette.muted(),
                ));
            }
        }
        (None, Some(err)) => lines.push(Line::styled(err.clone(), palette.error())),
        (None, None) if insight.is_loading() => lines.push(Line::styled(
            format!("{} Summarizing…", super::widgets::spinner_frame(ticks)),
            palette.muted(),
        )),
        (None, None) => {}
    }
    lines
}

fn draw_comments(
    frame: &mut Frame,
    area: Rect,
    palette: &Palette,
    section: &CommentSection,
    focus: HomeFocus,
    ticks: u64,
) {
    let [list_area, input_area] =
        Layout::vertical([Constraint::Min(3), Constraint::Length(3)]).areas(area);

    let block = Block::bordered()
        .border_style(palette.border(focus == HomeFocus::Comments))
        .title(format!(" Comments ({}) ", section.comments().len()));

    if section.is_loading() {
        let inner = block.inner(list_area);
        frame.render_widget(block, list_area);
        draw_spinner(frame, inner, palette, ticks, "Loading comments");
    } else if section.comments().is_empty() {
        let text = match section.error() {
            Some(err) => Text::styled(err.to_string(), palette.error()),
            None => Text::styled("No comments yet. Be the first!", palette.muted()),
        };
        frame.render_widget(Paragraph::new(text).block(block), list_area);
    } else {
        let items: Vec<ListItem> = section
            .comments()
            .iter()
            .map(|c| {
                let mut header = vec![
                    Span::styled(format!("[{}] ", c.initial()), palette.border(true)),
                    Span::styled(c.author(), palette.title()),
                ];
                if let Some(time) = c.time_label() {
                    header.push(Span::styled(format!(" · {}", time), palette.muted()));
                }
                ListItem::new(vec![Line::from(header), Line::from(format!("  {}", c.text))])
            })
            .collect();
        let title = match section.error() {
            Some(err) => Line::styled(format!(" {} ", err), palette.error()),
            None => Line::from(""),
        };
        let list = List::new(items)
            .block(block.title_bottom(title))
            .highlight_style(palette.highlight());
        let mut state = ListState::default()
            .with_selected((focus == HomeFocus::Comments).then_some(section.selected()));
        frame.render_stateful_widget(list, list_area, &mut state);
    }

    let editing = focus == HomeFocus::CommentInput;
    let prompt = if section.is_submitting() {
        Line::styled("Posting…", palette.muted())
    } else if section.input.value().is_empty() && !editing {
        Line::styled("Press c to write a comment", palette.muted())
    } else {
        Line::from(vec![
            Span::raw(section.input.value().to_string()),
            Span::styled(if editing { "▏" } else { "" }, palette.border(true)),
        ])
    };
    let input_block = Block::bordered()
        .border_style(palette.border(editing))
        .title(" Add a comment ");
    frame.render_widget(Paragraph::new(prompt).block(input_block), input_area);
}
