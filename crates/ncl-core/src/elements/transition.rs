use crate::{
    elements::{ImportBase, SetAttribute, parse_number},
    error::ModelError,
    identifier::Id,
    model::{Children, composite, holds},
    value::{Color, Time, TransitionDirection, TransitionSubtype, TransitionType},
};

/// Collection of transitions shared by the whole document.
#[derive(Debug, Clone)]
pub struct TransitionBase {
    id: Option<Id>,
    imports: Children,
    transitions: Children,
}

impl Default for TransitionBase {
    fn default() -> Self {
        Self {
            id: None,
            imports: Children::keyed(),
            transitions: Children::keyed(),
        }
    }
}

impl TransitionBase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> Option<Id> {
        self.id
    }

    pub fn set_id(&mut self, id: impl Into<Option<Id>>) {
        self.id = id.into();
    }

    /// Bases imported from other documents, ordered by alias.
    pub fn imports(&self) -> &Children {
        &self.imports
    }

    pub fn transitions(&self) -> &Children {
        &self.transitions
    }
}

composite!(TransitionBase { imports, transitions });
holds!(TransitionBase => imports: ImportBase);
holds!(TransitionBase => transitions: Transition);

impl SetAttribute for TransitionBase {
    fn set_attribute(&mut self, name: &str, value: &str) -> Result<bool, ModelError> {
        match name {
            "id" => self.id = Some(Id::parse(value)?),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// A visual effect applied when a node starts or ends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transition {
    id: Option<Id>,
    transition_type: Option<TransitionType>,
    subtype: Option<TransitionSubtype>,
    dur: Option<Time>,
    start_progress: Option<f64>,
    end_progress: Option<f64>,
    direction: Option<TransitionDirection>,
    fade_color: Option<Color>,
    hor_repeat: Option<u32>,
    vert_repeat: Option<u32>,
    border_width: Option<u32>,
    border_color: Option<Color>,
}

impl Transition {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> Option<Id> {
        self.id
    }

    pub fn set_id(&mut self, id: impl Into<Option<Id>>) {
        self.id = id.into();
    }

    pub fn transition_type(&self) -> Option<TransitionType> {
        self.transition_type
    }

    pub fn set_transition_type(&mut self, transition_type: impl Into<Option<TransitionType>>) {
        self.transition_type = transition_type.into();
    }

    pub fn subtype(&self) -> Option<TransitionSubtype> {
        self.subtype
    }

    pub fn set_subtype(&mut self, subtype: impl Into<Option<TransitionSubtype>>) {
        self.subtype = subtype.into();
    }

    pub fn dur(&self) -> Option<Time> {
        self.dur
    }

    pub fn set_dur(&mut self, dur: impl Into<Option<Time>>) {
        self.dur = dur.into();
    }

    pub fn start_progress(&self) -> Option<f64> {
        self.start_progress
    }

    /// # Errors
    ///
    /// Returns [`ModelError::InvalidArgument`] outside `0.0..=1.0`.
    pub fn set_start_progress(&mut self, progress: Option<f64>) -> Result<(), ModelError> {
        self.start_progress = progress.map(|p| check_progress("startProgress", p)).transpose()?;
        Ok(())
    }

    pub fn end_progress(&self) -> Option<f64> {
        self.end_progress
    }

    /// # Errors
    ///
    /// Returns [`ModelError::InvalidArgument`] outside `0.0..=1.0`.
    pub fn set_end_progress(&mut self, progress: Option<f64>) -> Result<(), ModelError> {
        self.end_progress = progress.map(|p| check_progress("endProgress", p)).transpose()?;
        Ok(())
    }

    pub fn direction(&self) -> Option<TransitionDirection> {
        self.direction
    }

    pub fn set_direction(&mut self, direction: impl Into<Option<TransitionDirection>>) {
        self.direction = direction.into();
    }

    pub fn fade_color(&self) -> Option<Color> {
        self.fade_color
    }

    pub fn set_fade_color(&mut self, color: impl Into<Option<Color>>) {
        self.fade_color = color.into();
    }

    pub fn hor_repeat(&self) -> Option<u32> {
        self.hor_repeat
    }

    pub fn set_hor_repeat(&mut self, repeat: Option<u32>) {
        self.hor_repeat = repeat;
    }

    pub fn vert_repeat(&self) -> Option<u32> {
        self.vert_repeat
    }

    pub fn set_vert_repeat(&mut self, repeat: Option<u32>) {
        self.vert_repeat = repeat;
    }

    pub fn border_width(&self) -> Option<u32> {
        self.border_width
    }

    pub fn set_border_width(&mut self, width: Option<u32>) {
        self.border_width = width;
    }

    pub fn border_color(&self) -> Option<Color> {
        self.border_color
    }

    pub fn set_border_color(&mut self, color: impl Into<Option<Color>>) {
        self.border_color = color.into();
    }
}

fn check_progress(attribute: &'static str, progress: f64) -> Result<f64, ModelError> {
    if !(0.0..=1.0).contains(&progress) {
        return Err(ModelError::invalid_argument(
            attribute,
            progress,
            "must be between 0 and 1",
        ));
    }
    Ok(progress)
}

impl SetAttribute for Transition {
    fn set_attribute(&mut self, name: &str, value: &str) -> Result<bool, ModelError> {
        match name {
            "id" => self.id = Some(Id::parse(value)?),
            "type" => self.transition_type = Some(value.parse()?),
            "subtype" => self.subtype = Some(value.parse()?),
            "dur" => self.dur = Some(value.parse()?),
            "startProgress" => {
                self.set_start_progress(Some(parse_number("startProgress", value)?))?;
            }
            "endProgress" => self.set_end_progress(Some(parse_number("endProgress", value)?))?,
            "direction" => self.direction = Some(value.parse()?),
            "fadeColor" => self.fade_color = Some(value.parse()?),
            "horRepeat" => self.hor_repeat = Some(parse_number("horRepeat", value)?),
            "vertRepeat" => self.vert_repeat = Some(parse_number("vertRepeat", value)?),
            "borderWidth" => self.border_width = Some(parse_number("borderWidth", value)?),
            "borderColor" => self.border_color = Some(value.parse()?),
            _ => return Ok(false),
        }
        Ok(true)
    }
}
