//! # Content Hierarchy
//!
//! Holds every course, module and topic and answers the structural questions
//! the rest of the core asks: "which modules does this course have, in order?",
//! "which topics does this module have, in order?", "which course owns this
//! module?".
//!
//! The tree is only ever grown through [`ContentHierarchy::add_course`],
//! [`ContentHierarchy::add_module`] and [`ContentHierarchy::add_topic`], which
//! attach a child to its parent's ordered list at the same time as they store
//! it. A child can therefore never be listed under one parent while pointing at
//! another, and no cycle can form.

use std::collections::BTreeMap;

use lts_common::error::EntityKind;
use lts_common::models::content::{Course, Module, Topic};
use lts_common::models::ids::{CourseId, ModuleId, TopicId};
use lts_common::{LtsError, Result};

/// One module as shown in a course's table of contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleTree {
    pub id: ModuleId,
    pub title: String,
    pub topics: Vec<TopicItem>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicItem {
    pub id: TopicId,
    pub title: String,
}

#[derive(Debug, Default, Clone)]
pub struct ContentHierarchy {
    courses: BTreeMap<CourseId, Course>,
    modules: BTreeMap<ModuleId, Module>,
    topics: BTreeMap<TopicId, Topic>,
}

impl ContentHierarchy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a course with no modules yet.
    pub fn add_course(&mut self, course: Course) -> Result<()> {
        if self.courses.contains_key(&course.id) {
            return Err(LtsError::Document(format!("duplicate course id {}", course.id)));
        }
        if !course.modules.is_empty() {
            return Err(LtsError::Document(format!(
                "course {} must be added before its modules",
                course.id
            )));
        }
        self.courses.insert(course.id, course);
        Ok(())
    }

    /// Stores a module and appends it to its course's module order.
    pub fn add_module(&mut self, module: Module) -> Result<()> {
        if self.modules.contains_key(&module.id) {
            return Err(LtsError::Document(format!("duplicate module id {}", module.id)));
        }
        if !module.topics.is_empty() {
            return Err(LtsError::Document(format!(
                "module {} must be added before its topics",
                module.id
            )));
        }
        let course = self.courses.get_mut(&module.course).ok_or_else(|| {
            LtsError::Document(format!(
                "module {} refers to unknown course {}",
                module.id, module.course
            ))
        })?;

        course.modules.push(module.id);
        self.modules.insert(module.id, module);
        Ok(())
    }

    /// Stores a topic and appends it to its module's topic order.
    pub fn add_topic(&mut self, topic: Topic) -> Result<()> {
        if self.topics.contains_key(&topic.id) {
            return Err(LtsError::Document(format!("duplicate topic id {}", topic.id)));
        }
        let module = self.modules.get_mut(&topic.module).ok_or_else(|| {
            LtsError::Document(format!(
                "topic {} refers to unknown module {}",
                topic.id, topic.module
            ))
        })?;

        module.topics.push(topic.id);
        self.topics.insert(topic.id, topic);
        Ok(())
    }

    pub fn course(&self, id: CourseId) -> Result<&Course> {
        self.courses
            .get(&id)
            .ok_or_else(|| LtsError::not_found(EntityKind::Course, id))
    }

    pub fn module(&self, id: ModuleId) -> Result<&Module> {
        self.modules
            .get(&id)
            .ok_or_else(|| LtsError::not_found(EntityKind::Module, id))
    }

    pub fn topic(&self, id: TopicId) -> Result<&Topic> {
        self.topics
            .get(&id)
            .ok_or_else(|| LtsError::not_found(EntityKind::Topic, id))
    }

    /// All courses in id order.
    pub fn courses(&self) -> impl Iterator<Item = &Course> {
        self.courses.values()
    }

    /// Courses whose title starts with `prefix`, ignoring case.
    ///
    /// An empty prefix matches every course.
    pub fn courses_with_title_prefix(&self, prefix: &str) -> Vec<&Course> {
        let prefix = prefix.to_lowercase();
        self.courses
            .values()
            .filter(|course| course.title.to_lowercase().starts_with(&prefix))
            .collect()
    }

    /// The course's modules in authoring order.
    pub fn modules_of(&self, course: CourseId) -> Result<Vec<&Module>> {
        let course = self.course(course)?;
        Ok(course
            .modules
            .iter()
            .filter_map(|id| self.modules.get(id))
            .collect())
    }

    /// The module's topics in step order.
    pub fn topics_of(&self, module: ModuleId) -> Result<Vec<&Topic>> {
        let module = self.module(module)?;
        Ok(module
            .topics
            .iter()
            .filter_map(|id| self.topics.get(id))
            .collect())
    }

    pub fn course_of(&self, module: ModuleId) -> Result<&Course> {
        let module = self.module(module)?;
        self.course(module.course)
    }

    pub fn module_tree(&self, course: CourseId) -> Result<Vec<ModuleTree>> {
        let modules = self.modules_of(course)?;
        Ok(modules
            .into_iter()
            .map(|module| ModuleTree {
                id: module.id,
                title: module.title.clone(),
                topics: module
                    .topics
                    .iter()
                    .filter_map(|id| self.topics.get(id))
                    .map(|topic| TopicItem {
                        id: topic.id,
                        title: topic.title.clone(),
                    })
                    .collect(),
            })
            .collect())
    }
}
