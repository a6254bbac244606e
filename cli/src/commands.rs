pub mod request;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lts_common::config::Config;
use lts_common::models::ids::{CourseId, ModuleId, TopicId};
use lts_core::Route;

#[derive(Parser)]
#[command(name = "lts")]
#[command(about = "Browse courses and track lesson progress.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,

    /// Storage document with courses, users and progress
    #[arg(long, global = true, default_value = "lts.json")]
    pub data: PathBuf,

    /// Directory holding cover images
    #[arg(long, global = true, default_value = "images")]
    pub images: PathBuf,

    /// Email of the signed-in user
    #[arg(long, short, global = true, env = "LTS_USER", default_value = "")]
    pub user: String,

    /// Less output; repeat for values only
    #[arg(short, global = true, action = clap::ArgAction::Count)]
    pub quiet: u8,

    /// Show redirects instead of following them
    #[arg(long, global = true)]
    pub no_follow: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List courses, optionally by title prefix
    #[command(alias = "ls")]
    Courses {
        #[arg(long, short, default_value = "")]
        prefix: String,
    },
    /// Show a course with its modules and your progress
    #[command(alias = "c")]
    Course { course: CourseId },
    /// Open the lesson at a step of a module
    #[command(alias = "l")]
    Lesson {
        course: CourseId,
        module: ModuleId,
        #[arg(long, short, allow_negative_numbers = true)]
        step: i64,
    },
    /// Open the lesson showing a given topic
    #[command(alias = "t")]
    Topic {
        course: CourseId,
        module: ModuleId,
        topic: TopicId,
    },
    /// Mark a topic as completed
    Complete {
        course: CourseId,
        module: ModuleId,
        #[arg(long, short)]
        topic: TopicId,
    },
    /// Assign yourself to a course
    Assign { course: CourseId },
    /// Remove yourself from a course
    Unassign { course: CourseId },
    /// Fetch a course's cover image
    Cover {
        course: CourseId,
        /// Write the image here instead of describing it
        #[arg(long, short)]
        out: Option<PathBuf>,
    },
    /// Send a raw request target, e.g. "/courses/1/modules/2?step=3"
    Get { target: String },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    pub fn config(&self) -> Config {
        Config {
            data_path: self.data.clone(),
            images_dir: self.images.clone(),
            user: self.user.clone(),
            quiet: self.quiet,
            no_follow: self.no_follow,
        }
    }
}

impl Commands {
    pub fn route(&self) -> anyhow::Result<Route> {
        let route = match self {
            Commands::Courses { prefix } => Route::Courses {
                title_prefix: prefix.clone(),
            },
            Commands::Course { course } => Route::Course { course: *course },
            Commands::Lesson { course, module, step } => Route::Lesson {
                course: *course,
                module: *module,
                step: *step,
            },
            Commands::Topic { course, module, topic } => Route::LessonTopic {
                course: *course,
                module: *module,
                topic: *topic,
            },
            Commands::Complete { course, module, topic } => Route::Complete {
                course: *course,
                module: *module,
                topic: *topic,
            },
            Commands::Assign { course } => Route::Assign { course: *course },
            Commands::Unassign { course } => Route::Unassign { course: *course },
            Commands::Cover { course, .. } => Route::Cover { course: *course },
            Commands::Get { target } => Route::parse("GET", target)?,
        };
        Ok(route)
    }

    pub fn output_file(&self) -> Option<PathBuf> {
        match self {
            Commands::Cover { out, .. } => out.clone(),
            _ => None,
        }
    }
}
