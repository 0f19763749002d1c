//! Closed vocabularies of attribute values.
//!
//! Each catalog is an enum with one variant per legal token. All of them
//! implement [`Catalog`], which provides lookup by token, and
//! [`FromStr`](std::str::FromStr)/[`Display`](fmt::Display) for the markup
//! form.

use std::fmt;

use crate::error::ModelError;

/// A closed vocabulary of tokens.
pub trait Catalog: Copy + Eq + fmt::Display + 'static {
    /// Name of the vocabulary, used in error messages.
    const NAME: &'static str;

    /// Every member, in declaration order.
    fn all() -> &'static [Self];

    /// The markup token of this member.
    fn token(&self) -> &'static str;

    /// Find the member whose token is `token`.
    fn lookup(token: &str) -> Option<Self> {
        Self::all().iter().copied().find(|member| member.token() == token)
    }
}

macro_rules! catalog {
    (
        $(#[$meta:meta])*
        $name:ident ($label:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $token:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// The markup token of this member.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $token ),+
                }
            }
        }

        impl Catalog for $name {
            const NAME: &'static str = $label;

            fn all() -> &'static [Self] {
                &[$( $name::$variant ),+]
            }

            fn token(&self) -> &'static str {
                self.as_str()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = ModelError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                <$name as Catalog>::lookup(s).ok_or_else(|| {
                    ModelError::invalid_argument($label, s, concat!("not a known ", $label))
                })
            }
        }
    };
}

catalog! {
    /// Named colors accepted by color attributes.
    Color ("color") {
        White => "white",
        Black => "black",
        Silver => "silver",
        Gray => "gray",
        Red => "red",
        Maroon => "maroon",
        Fuchsia => "fuchsia",
        Purple => "purple",
        Lime => "lime",
        Green => "green",
        Yellow => "yellow",
        Olive => "olive",
        Blue => "blue",
        Navy => "navy",
        Aqua => "aqua",
        Teal => "teal",
    }
}

catalog! {
    /// Families of transition effects.
    TransitionType ("transition type") {
        BarWipe => "barWipe",
        IrisWipe => "irisWipe",
        ClockWipe => "clockWipe",
        SnakeWipe => "snakeWipe",
        Fade => "fade",
    }
}

catalog! {
    /// Variants of a transition effect. Each belongs to one [`TransitionType`].
    TransitionSubtype ("transition subtype") {
        LeftToRight => "leftToRight",
        TopToBottom => "topToBottom",
        Rectangle => "rectangle",
        Diamond => "diamond",
        ClockwiseTwelve => "clockwiseTwelve",
        ClockwiseThree => "clockwiseThree",
        ClockwiseSix => "clockwiseSix",
        ClockwiseNine => "clockwiseNine",
        TopLeftHorizontal => "topLeftHorizontal",
        TopLeftVertical => "topLeftVertical",
        TopLeftDiagonal => "topLeftDiagonal",
        TopRightDiagonal => "topRightDiagonal",
        BottomRightDiagonal => "bottomRightDiagonal",
        BottomLeftDiagonal => "bottomLeftDiagonal",
        Crossfade => "crossfade",
        FadeToColor => "fadeToColor",
        FadeFromColor => "fadeFromColor",
    }
}

impl TransitionSubtype {
    /// The transition type this subtype belongs to.
    pub fn transition_type(&self) -> TransitionType {
        match self {
            TransitionSubtype::LeftToRight | TransitionSubtype::TopToBottom => {
                TransitionType::BarWipe
            }
            TransitionSubtype::Rectangle | TransitionSubtype::Diamond => TransitionType::IrisWipe,
            TransitionSubtype::ClockwiseTwelve
            | TransitionSubtype::ClockwiseThree
            | TransitionSubtype::ClockwiseSix
            | TransitionSubtype::ClockwiseNine => TransitionType::ClockWipe,
            TransitionSubtype::TopLeftHorizontal
            | TransitionSubtype::TopLeftVertical
            | TransitionSubtype::TopLeftDiagonal
            | TransitionSubtype::TopRightDiagonal
            | TransitionSubtype::BottomRightDiagonal
            | TransitionSubtype::BottomLeftDiagonal => TransitionType::SnakeWipe,
            TransitionSubtype::Crossfade
            | TransitionSubtype::FadeToColor
            | TransitionSubtype::FadeFromColor => TransitionType::Fade,
        }
    }

    /// Returns `true` for the fade subtypes that use a fade color.
    pub fn uses_fade_color(&self) -> bool {
        matches!(
            self,
            TransitionSubtype::FadeToColor | TransitionSubtype::FadeFromColor
        )
    }
}

catalog! {
    TransitionDirection ("transition direction") {
        Forward => "forward",
        Reverse => "reverse",
    }
}

catalog! {
    /// Comparison operators of test rules.
    Comparator ("comparator") {
        Eq => "eq",
        Ne => "ne",
        Gt => "gt",
        Lt => "lt",
        Gte => "gte",
        Lte => "lte",
    }
}

catalog! {
    /// Remote control keys that trigger selection events.
    Key ("key") {
        Digit0 => "0",
        Digit1 => "1",
        Digit2 => "2",
        Digit3 => "3",
        Digit4 => "4",
        Digit5 => "5",
        Digit6 => "6",
        Digit7 => "7",
        Digit8 => "8",
        Digit9 => "9",
        A => "A",
        B => "B",
        C => "C",
        D => "D",
        E => "E",
        F => "F",
        G => "G",
        H => "H",
        I => "I",
        J => "J",
        K => "K",
        L => "L",
        M => "M",
        N => "N",
        O => "O",
        P => "P",
        Q => "Q",
        R => "R",
        S => "S",
        T => "T",
        U => "U",
        V => "V",
        W => "W",
        X => "X",
        Y => "Y",
        Z => "Z",
        Asterisk => "*",
        Hash => "#",
        Menu => "MENU",
        Info => "INFO",
        Guide => "GUIDE",
        CursorDown => "CURSOR_DOWN",
        CursorLeft => "CURSOR_LEFT",
        CursorRight => "CURSOR_RIGHT",
        CursorUp => "CURSOR_UP",
        ChannelDown => "CHANNEL_DOWN",
        ChannelUp => "CHANNEL_UP",
        VolumeDown => "VOLUME_DOWN",
        VolumeUp => "VOLUME_UP",
        Enter => "ENTER",
        Red => "RED",
        Green => "GREEN",
        Yellow => "YELLOW",
        Blue => "BLUE",
        Back => "BACK",
        Exit => "EXIT",
        Power => "POWER",
        Rewind => "REWIND",
        Stop => "STOP",
        Eject => "EJECT",
        Play => "PLAY",
        Record => "RECORD",
        Pause => "PAUSE",
    }
}

catalog! {
    /// Kinds of events a condition or action refers to.
    EventType ("event type") {
        Presentation => "presentation",
        Selection => "selection",
        Attribution => "attribution",
        Composition => "composition",
    }
}

catalog! {
    /// State transitions of an event.
    EventTransition ("event transition") {
        Starts => "starts",
        Stops => "stops",
        Pauses => "pauses",
        Resumes => "resumes",
        Aborts => "aborts",
    }
}

catalog! {
    /// Boolean combination of conditions, qualifiers and composite rules.
    LogicalOperator ("logical operator") {
        And => "and",
        Or => "or",
    }
}

catalog! {
    /// Scheduling of grouped actions.
    ActionOperator ("action operator") {
        Par => "par",
        Seq => "seq",
    }
}

catalog! {
    ActionType ("action type") {
        Start => "start",
        Stop => "stop",
        Pause => "pause",
        Resume => "resume",
        Abort => "abort",
    }
}

catalog! {
    /// Condition roles with a predefined meaning.
    DefaultConditionRole ("condition role") {
        OnBegin => "onBegin",
        OnEnd => "onEnd",
        OnAbort => "onAbort",
        OnPause => "onPause",
        OnResume => "onResume",
        OnSelection => "onSelection",
        OnBeginAttribution => "onBeginAttribution",
        OnEndAttribution => "onEndAttribution",
    }
}

impl DefaultConditionRole {
    /// Returns `true` for roles triggered by a key selection.
    pub fn is_selection(&self) -> bool {
        matches!(self, DefaultConditionRole::OnSelection)
    }
}

catalog! {
    /// Action roles with a predefined meaning.
    DefaultActionRole ("action role") {
        Start => "start",
        Stop => "stop",
        Abort => "abort",
        Pause => "pause",
        Resume => "resume",
        Set => "set",
    }
}

catalog! {
    /// Presentation properties a descriptor parameter may set.
    PresentationAttribute ("presentation attribute") {
        Top => "top",
        Left => "left",
        Bottom => "bottom",
        Right => "right",
        Width => "width",
        Height => "height",
        Location => "location",
        Size => "size",
        Bounds => "bounds",
        Background => "background",
        Visible => "visible",
        Transparency => "transparency",
        Fit => "fit",
        Scroll => "scroll",
        Style => "style",
        SoundLevel => "soundLevel",
        BalanceLevel => "balanceLevel",
        TrebleLevel => "trebleLevel",
        BassLevel => "bassLevel",
        ZIndex => "zIndex",
        FontColor => "fontColor",
        FontFamily => "fontFamily",
        FontStyle => "fontStyle",
        FontSize => "fontSize",
        FontVariant => "fontVariant",
        FontWeight => "fontWeight",
        ReusePlayer => "reusePlayer",
        PlayerLife => "playerLife",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_token() {
        assert_eq!(Color::lookup("navy"), Some(Color::Navy));
        assert_eq!(Key::lookup("CURSOR_UP"), Some(Key::CursorUp));
        assert_eq!(Key::lookup("#"), Some(Key::Hash));
        assert_eq!(Comparator::lookup("neq"), None);
    }

    #[test]
    fn test_from_str_error() {
        let err = "sideways".parse::<TransitionDirection>().unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value `sideways` for `transition direction`: not a known transition direction"
        );
    }

    #[test]
    fn test_every_token_round_trips() {
        for subtype in TransitionSubtype::all() {
            assert_eq!(subtype.as_str().parse::<TransitionSubtype>(), Ok(*subtype));
        }
        for key in Key::all() {
            assert_eq!(key.to_string().parse::<Key>(), Ok(*key));
        }
    }

    #[test]
    fn test_subtype_belongs_to_type() {
        assert_eq!(
            TransitionSubtype::Crossfade.transition_type(),
            TransitionType::Fade
        );
        assert_eq!(
            TransitionSubtype::LeftToRight.transition_type(),
            TransitionType::BarWipe
        );
        assert_eq!(
            TransitionSubtype::ClockwiseNine.transition_type(),
            TransitionType::ClockWipe
        );
        assert!(TransitionSubtype::FadeFromColor.uses_fade_color());
        assert!(!TransitionSubtype::Crossfade.uses_fade_color());
    }

    #[test]
    fn test_every_type_has_a_subtype() {
        for kind in TransitionType::all() {
            assert!(
                TransitionSubtype::all()
                    .iter()
                    .any(|subtype| subtype.transition_type() == *kind),
                "{kind} has no subtype"
            );
        }
    }
}
