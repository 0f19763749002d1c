use crate::{
    elements::{
        BindRule, ImportBase, SetAttribute, Transition, non_empty, parse_bool, parse_number,
    },
    error::ModelError,
    identifier::Id,
    model::{Children, Reference, composite, holds},
    value::{Color, PresentationAttribute, Time},
};

/// Collection of descriptors and descriptor switches shared by the whole
/// document.
#[derive(Debug, Clone)]
pub struct DescriptorBase {
    id: Option<Id>,
    imports: Children,
    descriptors: Children,
}

impl Default for DescriptorBase {
    fn default() -> Self {
        Self {
            id: None,
            imports: Children::keyed(),
            descriptors: Children::keyed(),
        }
    }
}

impl DescriptorBase {
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

    pub fn descriptors(&self) -> &Children {
        &self.descriptors
    }
}

composite!(DescriptorBase { imports, descriptors });
holds!(DescriptorBase => imports: ImportBase);
holds!(DescriptorBase => descriptors: Descriptor);
holds!(DescriptorBase => descriptors: DescriptorSwitch);

impl SetAttribute for DescriptorBase {
    fn set_attribute(&mut self, name: &str, value: &str) -> Result<bool, ModelError> {
        match name {
            "id" => self.id = Some(Id::parse(value)?),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// Presentation parameters applied to a node.
#[derive(Debug, Clone)]
pub struct Descriptor {
    id: Option<Id>,
    player: Option<String>,
    explicit_dur: Option<Time>,
    freeze: Option<bool>,
    focus_index: Option<u32>,
    focus_border_color: Option<Color>,
    focus_border_width: Option<i32>,
    sel_border_color: Option<Color>,
    trans_in: Option<Reference<Transition>>,
    trans_out: Option<Reference<Transition>>,
    params: Children,
}

impl Default for Descriptor {
    fn default() -> Self {
        Self {
            id: None,
            player: None,
            explicit_dur: None,
            freeze: None,
            focus_index: None,
            focus_border_color: None,
            focus_border_width: None,
            sel_border_color: None,
            trans_in: None,
            trans_out: None,
            params: Children::keyed(),
        }
    }
}

impl Descriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> Option<Id> {
        self.id
    }

    pub fn set_id(&mut self, id: impl Into<Option<Id>>) {
        self.id = id.into();
    }

    pub fn player(&self) -> Option<&str> {
        self.player.as_deref()
    }

    pub fn set_player(&mut self, player: Option<&str>) {
        self.player = player.map(str::to_string);
    }

    pub fn explicit_dur(&self) -> Option<Time> {
        self.explicit_dur
    }

    pub fn set_explicit_dur(&mut self, dur: impl Into<Option<Time>>) {
        self.explicit_dur = dur.into();
    }

    pub fn freeze(&self) -> Option<bool> {
        self.freeze
    }

    pub fn set_freeze(&mut self, freeze: Option<bool>) {
        self.freeze = freeze;
    }

    pub fn focus_index(&self) -> Option<u32> {
        self.focus_index
    }

    pub fn set_focus_index(&mut self, index: Option<u32>) {
        self.focus_index = index;
    }

    pub fn focus_border_color(&self) -> Option<Color> {
        self.focus_border_color
    }

    pub fn set_focus_border_color(&mut self, color: impl Into<Option<Color>>) {
        self.focus_border_color = color.into();
    }

    /// Border width in pixels; negative widths draw inside the region.
    pub fn focus_border_width(&self) -> Option<i32> {
        self.focus_border_width
    }

    pub fn set_focus_border_width(&mut self, width: Option<i32>) {
        self.focus_border_width = width;
    }

    pub fn sel_border_color(&self) -> Option<Color> {
        self.sel_border_color
    }

    pub fn set_sel_border_color(&mut self, color: impl Into<Option<Color>>) {
        self.sel_border_color = color.into();
    }

    pub fn trans_in(&self) -> Option<&Reference<Transition>> {
        self.trans_in.as_ref()
    }

    pub fn set_trans_in(&mut self, transition: impl Into<Option<Reference<Transition>>>) {
        self.trans_in = transition.into();
    }

    pub fn trans_out(&self) -> Option<&Reference<Transition>> {
        self.trans_out.as_ref()
    }

    pub fn set_trans_out(&mut self, transition: impl Into<Option<Reference<Transition>>>) {
        self.trans_out = transition.into();
    }

    pub(crate) fn transitions_mut(
        &mut self,
    ) -> [Option<&mut Reference<Transition>>; 2] {
        [self.trans_in.as_mut(), self.trans_out.as_mut()]
    }

    pub fn params(&self) -> &Children {
        &self.params
    }
}

composite!(Descriptor { params });
holds!(Descriptor => params: DescriptorParam);

impl SetAttribute for Descriptor {
    fn set_attribute(&mut self, name: &str, value: &str) -> Result<bool, ModelError> {
        match name {
            "id" => self.id = Some(Id::parse(value)?),
            "player" => self.player = Some(non_empty("player", value)?),
            "explicitDur" => self.explicit_dur = Some(value.parse()?),
            "freeze" => self.freeze = Some(parse_bool("freeze", value)?),
            "focusIndex" => self.focus_index = Some(parse_number("focusIndex", value)?),
            "focusBorderColor" => self.focus_border_color = Some(value.parse()?),
            "focusBorderWidth" => {
                self.focus_border_width = Some(parse_number("focusBorderWidth", value)?);
            }
            "selBorderColor" => self.sel_border_color = Some(value.parse()?),
            "transIn" => self.trans_in = Some(Reference::placeholder(Id::parse(value)?)),
            "transOut" => self.trans_out = Some(Reference::placeholder(Id::parse(value)?)),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// One presentation property set by a descriptor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DescriptorParam {
    name: Option<PresentationAttribute>,
    value: Option<String>,
}

impl DescriptorParam {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> Option<PresentationAttribute> {
        self.name
    }

    pub fn set_name(&mut self, name: impl Into<Option<PresentationAttribute>>) {
        self.name = name.into();
    }

    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    /// # Errors
    ///
    /// Returns [`ModelError::InvalidArgument`] for a blank value.
    pub fn set_value(&mut self, value: Option<&str>) -> Result<(), ModelError> {
        self.value = value.map(|value| non_empty("value", value)).transpose()?;
        Ok(())
    }
}

impl SetAttribute for DescriptorParam {
    fn set_attribute(&mut self, name: &str, value: &str) -> Result<bool, ModelError> {
        match name {
            "name" => self.name = Some(value.parse()?),
            "value" => self.set_value(Some(value))?,
            _ => return Ok(false),
        }
        Ok(true)
    }
}

/// Chooses one of its descriptors by evaluating bind rules in order.
#[derive(Debug, Clone)]
pub struct DescriptorSwitch {
    id: Option<Id>,
    bind_rules: Children,
    descriptors: Children,
    default_descriptor: Option<Reference<Descriptor>>,
}

impl Default for DescriptorSwitch {
    fn default() -> Self {
        Self {
            id: None,
            bind_rules: Children::ordered(),
            descriptors: Children::keyed(),
            default_descriptor: None,
        }
    }
}

impl DescriptorSwitch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(&self) -> Option<Id> {
        self.id
    }

    pub fn set_id(&mut self, id: impl Into<Option<Id>>) {
        self.id = id.into();
    }

    pub fn bind_rules(&self) -> &Children {
        &self.bind_rules
    }

    pub fn descriptors(&self) -> &Children {
        &self.descriptors
    }

    /// The descriptor chosen when no bind rule holds; one of this switch's
    /// own descriptors.
    pub fn default_descriptor(&self) -> Option<&Reference<Descriptor>> {
        self.default_descriptor.as_ref()
    }

    pub fn set_default_descriptor(
        &mut self,
        descriptor: impl Into<Option<Reference<Descriptor>>>,
    ) {
        self.default_descriptor = descriptor.into();
    }

    pub(crate) fn default_descriptor_mut(&mut self) -> Option<&mut Reference<Descriptor>> {
        self.default_descriptor.as_mut()
    }
}

composite!(DescriptorSwitch {
    bind_rules,
    descriptors
});
holds!(DescriptorSwitch => bind_rules: BindRule);
holds!(DescriptorSwitch => descriptors: Descriptor);

impl SetAttribute for DescriptorSwitch {
    fn set_attribute(&mut self, name: &str, value: &str) -> Result<bool, ModelError> {
        match name {
            "id" => self.id = Some(Id::parse(value)?),
            _ => return Ok(false),
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_attributes() {
        let mut descriptor = Descriptor::new();

        assert_eq!(descriptor.set_attribute("freeze", "true"), Ok(true));
        assert_eq!(descriptor.set_attribute("focusBorderWidth", "-2"), Ok(true));
        assert_eq!(descriptor.set_attribute("transIn", "fadeIn"), Ok(true));
        assert!(descriptor.set_attribute("focusIndex", "-1").is_err());
        assert!(descriptor.set_attribute("selBorderColor", "mauve").is_err());

        assert_eq!(descriptor.freeze(), Some(true));
        assert_eq!(descriptor.focus_border_width(), Some(-2));
        assert_eq!(descriptor.trans_in().unwrap().id(), "fadeIn");
        assert!(descriptor.trans_out().is_none());
    }

    #[test]
    fn test_descriptor_param_name_is_a_presentation_attribute() {
        let mut param = DescriptorParam::new();

        assert_eq!(param.set_attribute("name", "soundLevel"), Ok(true));
        assert!(param.set_attribute("name", "loudness").is_err());
        assert_eq!(param.name(), Some(PresentationAttribute::SoundLevel));
    }
}
