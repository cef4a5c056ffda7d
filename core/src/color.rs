use serde::{Deserialize, Serialize};

/// One entry of the fixed palette that targets and cells are drawn from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Tomato,
    DodgerBlue,
    LimeGreen,
    Gold,
    HotPink,
    BlueViolet,
    DarkTurquoise,
}

impl Color {
    /// The whole palette, in a stable order.
    pub const ALL: [Color; 7] = [
        Color::Tomato,
        Color::DodgerBlue,
        Color::LimeGreen,
        Color::Gold,
        Color::HotPink,
        Color::BlueViolet,
        Color::DarkTurquoise,
    ];

    pub const fn hex(self) -> &'static str {
        use Color::*;
        match self {
            Tomato => "#FF6347",
            DodgerBlue => "#1E90FF",
            LimeGreen => "#32CD32",
            Gold => "#FFD700",
            HotPink => "#FF69B4",
            BlueViolet => "#8A2BE2",
            DarkTurquoise => "#00CED1",
        }
    }

    pub const fn name(self) -> &'static str {
        use Color::*;
        match self {
            Tomato => "tomato",
            DodgerBlue => "dodger blue",
            LimeGreen => "lime green",
            Gold => "gold",
            HotPink => "hot pink",
            BlueViolet => "blue violet",
            DarkTurquoise => "dark turquoise",
        }
    }
}

impl core::fmt::Display for Color {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
