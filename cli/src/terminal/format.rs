use colored::*;
use lts_common::config::Config;
use lts_core::Route;
use lts_core::progress::CourseProgress;
use lts_core::services::catalog::{CourseSummary, CoursePage, CoverImage};
use lts_core::services::lessons::LessonPage;

use crate::mprint;
use crate::terminal::{colors, print};

type Detail = (String, ColoredString);

pub fn course_list(courses: &[CourseSummary], cfg: &Config) {
    print::header("courses", cfg.quiet);
    if courses.is_empty() {
        print::no_results();
        return;
    }

    for course in courses {
        match cfg.quiet {
            2 => {
                mprint!(&format!("{}\t{}", course.id, course.title));
            }
            _ => print::tree_head(course.id, &course.title),
        }
    }
}

pub fn course_page(page: &CoursePage, cfg: &Config) {
    print::header(&page.course.title, cfg.quiet);

    if cfg.quiet < 2 {
        print::aligned_line("Course", page.course.id.to_string());
        print::aligned_line("Assigned", yes_no(page.assigned));
        print::aligned_line("Progress", progress_bar(&page.progress));
        mprint!();
    }

    for (idx, module) in page.modules.iter().enumerate() {
        print::tree_head(idx + 1, &module.title);
        let details: Vec<Detail> = module
            .topics
            .iter()
            .enumerate()
            .map(|(step, topic)| {
                (
                    format!("step {}", step + 1),
                    format!("{} (#{})", topic.title, topic.id).normal(),
                )
            })
            .collect();
        print::as_tree_one_level(details);
    }

    if cfg.quiet == 0 {
        print::fat_separator();
        print::centerln(&page.progress.to_string());
    }
}

pub fn lesson_page(page: &LessonPage, cfg: &Config) {
    let position = &page.position;
    print::header(&page.module_title, cfg.quiet);

    if cfg.quiet < 2 {
        print::aligned_line("Topic", page.topic.title.clone());
        print::aligned_line(
            "Step",
            format!("{} of {}", position.step, position.max_step),
        );
        print::aligned_line("Status", status(page.completed));
        mprint!();
    }

    mprint!(&page.topic.content);

    if cfg.quiet < 2 {
        mprint!();
        let nav: Vec<Detail> = vec![
            (
                "previous".to_string(),
                step_link(page, position.previous, position.is_first()),
            ),
            (
                "next".to_string(),
                step_link(page, position.next, position.is_last()),
            ),
        ];
        print::as_tree_one_level(nav);
    }
}

pub fn image(image: &CoverImage, cfg: &Config) {
    print::header("cover", cfg.quiet);
    print::aligned_line("Type", image.content_type.clone());
    print::aligned_line("Size", format!("{} bytes", image.data.len()));
}

fn step_link(page: &LessonPage, step: usize, at_edge: bool) -> ColoredString {
    let target = Route::Lesson {
        course: page.course_id,
        module: page.module_id,
        step: step as i64,
    }
    .to_string();
    if at_edge {
        target.dimmed()
    } else {
        target.color(colors::ACCENT)
    }
}

fn yes_no(value: bool) -> ColoredString {
    if value {
        "yes".color(colors::DONE)
    } else {
        "no".color(colors::PENDING)
    }
}

fn status(completed: bool) -> ColoredString {
    if completed {
        "completed".color(colors::DONE).bold()
    } else {
        "not completed".color(colors::PENDING)
    }
}

fn progress_bar(progress: &CourseProgress) -> ColoredString {
    const WIDTH: usize = 20;
    let filled = if progress.total == 0 {
        0
    } else {
        progress.completed * WIDTH / progress.total
    };
    let bar = format!(
        "[{}{}] {}/{}",
        "#".repeat(filled),
        "-".repeat(WIDTH - filled),
        progress.completed,
        progress.total
    );
    if progress.is_finished() {
        bar.color(colors::DONE).bold()
    } else {
        bar.color(colors::TEXT_DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lts_common::models::ids::{CourseId, ModuleId, TopicId};
    use lts_core::navigator::LessonPosition;
    use lts_core::services::lessons::TopicView;

    #[test]
    fn step_links_match_lesson_routes() {
        let page = LessonPage {
            course_id: CourseId(1),
            module_id: ModuleId(10),
            module_title: "Ownership".into(),
            topic: TopicView {
                id: TopicId(101),
                title: "Borrows".into(),
                content: String::new(),
            },
            position: LessonPosition::new(2, 3),
            completed: false,
        };

        let link = step_link(&page, page.position.next, false);
        let route = Route::parse("GET", &link).unwrap();
        assert_eq!(
            route,
            Route::Lesson {
                course: CourseId(1),
                module: ModuleId(10),
                step: 3,
            }
        );
    }
}
