use super::Combination;

pub(super) const PALETTE_TOKENS: &[(&str, &str)] = &[
    ("primary-50", "#eff6ff"),
    ("primary-100", "#dbeafe"),
    ("primary-200", "#bfdbfe"),
    ("primary-300", "#93c5fd"),
    ("primary-400", "#60a5fa"),
    ("primary-500", "#3b82f6"),
    ("primary-600", "#2563eb"),
    ("primary-700", "#1d4ed8"),
    ("primary-800", "#1e40af"),
    ("primary-900", "#1e3a8a"),
    ("primary-950", "#172554"),

    ("secondary-50", "#f0fdf4"),
    ("secondary-100", "#dcfce7"),
    ("secondary-200", "#bbf7d0"),
    ("secondary-300", "#86efac"),
    ("secondary-400", "#4ade80"),
    ("secondary-500", "#22c55e"),
    ("secondary-600", "#16a34a"),
    ("secondary-700", "#15803d"),
    ("secondary-800", "#166534"),
    ("secondary-900", "#14532d"),

    ("accent-50", "#faf5ff"),
    ("accent-100", "#f3e8ff"),
    ("accent-200", "#e9d5ff"),
    ("accent-300", "#d8b4fe"),
    ("accent-400", "#c084fc"),
    ("accent-500", "#a855f7"),
    ("accent-600", "#9333ea"),
    ("accent-700", "#7e22ce"),
    ("accent-800", "#6b21a8"),
    ("accent-900", "#581c87"),

    ("neutral-50", "#fafafa"),
    ("neutral-100", "#f5f5f5"),
    ("neutral-200", "#e5e5e5"),
    ("neutral-300", "#d4d4d4"),
    ("neutral-400", "#a3a3a3"),
    ("neutral-500", "#737373"),
    ("neutral-600", "#525252"),
    ("neutral-700", "#404040"),
    ("neutral-800", "#262626"),
    ("neutral-900", "#171717"),
    ("neutral-950", "#0a0a0a"),

    ("white", "#ffffff"),
    ("black", "#000000"),

    ("success", "#10b981"),
    ("warning", "#f59e0b"),
    ("danger", "#ef4444"),
    ("info", "#06b6d4"),

    ("gray-50", "#f9fafb"),
    ("gray-100", "#f3f4f6"),
    ("gray-200", "#e5e7eb"),
    ("gray-300", "#d1d5db"),
    ("gray-400", "#9ca3af"),
    ("gray-500", "#6b7280"),
    ("gray-600", "#4b5563"),
    ("gray-700", "#374151"),
    ("gray-800", "#1f2937"),
    ("gray-900", "#111827"),
    ("gray-950", "#030712"),

    ("blue-50", "#eff6ff"),
    ("blue-100", "#dbeafe"),
    ("blue-200", "#bfdbfe"),
    ("blue-300", "#93c5fd"),
    ("blue-400", "#60a5fa"),
    ("blue-500", "#3b82f6"),
    ("blue-600", "#2563eb"),
    ("blue-700", "#1d4ed8"),
    ("blue-800", "#1e40af"),
    ("blue-900", "#1e3a8a"),
    ("blue-950", "#172554"),

    ("green-50", "#f0fdf4"),
    ("green-100", "#dcfce7"),
    ("green-200", "#bbf7d0"),
    ("green-300", "#86efac"),
    ("green-400", "#4ade80"),
    ("green-500", "#22c55e"),
    ("green-600", "#16a34a"),
    ("green-700", "#15803d"),
    ("green-800", "#166534"),
    ("green-900", "#14532d"),
    ("green-950", "#052e16"),

    ("red-50", "#fef2f2"),
    ("red-100", "#fee2e2"),
    ("red-200", "#fecaca"),
    ("red-300", "#fca5a5"),
    ("red-400", "#f87171"),
    ("red-500", "#ef4444"),
    ("red-600", "#dc2626"),
    ("red-700", "#b91c1c"),
    ("red-800", "#991b1b"),
    ("red-900", "#7f1d1d"),
    ("red-950", "#450a0a"),

    ("purple-50", "#faf5ff"),
    ("purple-100", "#f3e8ff"),
    ("purple-200", "#e9d5ff"),
    ("purple-300", "#d8b4fe"),
    ("purple-400", "#c084fc"),
    ("purple-500", "#a855f7"),
    ("purple-600", "#9333ea"),
    ("purple-700", "#7e22ce"),
    ("purple-800", "#6b21a8"),
    ("purple-900", "#581c87"),
    ("purple-950", "#3b0764"),

    ("orange-50", "#fff7ed"),
    ("orange-100", "#ffedd5"),
    ("orange-200", "#fed7aa"),
    ("orange-300", "#fdba74"),
    ("orange-400", "#fb923c"),
    ("orange-500", "#f97316"),
    ("orange-600", "#ea580c"),
    ("orange-700", "#c2410c"),
    ("orange-800", "#9a3412"),
    ("orange-900", "#7c2d12"),
    ("orange-950", "#431407"),

    ("yellow-50", "#fefce8"),
    ("yellow-100", "#fef3c7"),
    ("yellow-200", "#fde68a"),
    ("yellow-300", "#fcd34d"),
    ("yellow-400", "#fbbf24"),
    ("yellow-500", "#f59e0b"),
    ("yellow-600", "#d97706"),
    ("yellow-700", "#b45309"),
    ("yellow-800", "#92400e"),
    ("yellow-900", "#78350f"),
    ("yellow-950", "#451a03"),
];

/// Text/background pairs as they appear across the results views.
pub fn builtin_combinations() -> Vec<Combination> {
    vec![
        Combination::new("neutral-900", "white", "Primary text on white background"),
        Combination::new("neutral-800", "white", "Secondary text on white background"),
        Combination::new("neutral-600", "white", "Tertiary text on white background"),
        Combination::new("neutral-500", "white", "Muted text on white background"),
        Combination::new("neutral-900", "neutral-50", "Primary text on light gray background"),
        Combination::new("neutral-800", "neutral-50", "Secondary text on light gray background"),
        Combination::new("neutral-600", "neutral-100", "Text on light gray background"),
        Combination::new("white", "primary-600", "Primary button text"),
        Combination::new("white", "primary-700", "Primary button hover text"),
        Combination::new("primary-700", "primary-50", "Secondary button text"),
        Combination::new("primary-800", "primary-100", "Secondary button hover text"),
        Combination::new("green-700", "green-50", "Success message text"),
        Combination::new("green-800", "green-100", "Success badge text"),
        Combination::new("red-700", "red-50", "Error message text"),
        Combination::new("red-800", "red-100", "Error badge text"),
        Combination::new("blue-700", "blue-50", "Info message text"),
        Combination::new("blue-800", "blue-100", "Info badge text"),
        Combination::new("orange-700", "orange-50", "Warning message text"),
        Combination::new("orange-800", "orange-100", "Warning badge text"),
        Combination::new("neutral-900", "neutral-50", "Card title on light background"),
        Combination::new("neutral-600", "neutral-50", "Card description on light background"),
        Combination::new("primary-600", "white", "Link text on white background"),
        Combination::new("primary-700", "white", "Link hover text on white background"),
        Combination::new("neutral-50", "neutral-900", "Dark mode primary text"),
        Combination::new("neutral-200", "neutral-900", "Dark mode secondary text"),
        Combination::new("neutral-400", "neutral-800", "Dark mode tertiary text"),
        Combination::new("gray-900", "white", "Gray text on white (SocialProof, HowItWorks)"),
        Combination::new("gray-600", "white", "Gray secondary text on white"),
        Combination::new("gray-700", "white", "Gray tertiary text on white"),
        Combination::new("gray-500", "white", "Gray muted text on white"),
        Combination::new("blue-600", "white", "Blue link text on white"),
        Combination::new("blue-700", "white", "Blue link hover text on white"),
        Combination::new("blue-500", "white", "Blue icon text on white"),
        Combination::new("green-700", "green-100", "Green badge text"),
        Combination::new("yellow-700", "yellow-100", "Yellow badge text"),
        Combination::new("red-700", "red-100", "Red badge text"),
        Combination::new("blue-600", "blue-100", "Blue icon on blue background"),
        Combination::new("blue-600", "blue-50", "Blue icon on light blue background"),
        Combination::new("green-600", "green-100", "Green icon on green background"),
        Combination::new("purple-600", "purple-100", "Purple icon on purple background"),
        Combination::new("orange-600", "orange-100", "Orange icon on orange background"),
        Combination::new("white", "blue-600", "Blue button text"),
        Combination::new("white", "blue-700", "Blue button hover text"),
        Combination::new("white", "gray-600", "Gray button text"),
        Combination::new("white", "gray-700", "Gray button hover text"),
        Combination::new("white", "green-600", "Green button text"),
        Combination::new("white", "green-700", "Green button hover text"),
        Combination::new("orange-700", "orange-50", "Orange metric text"),
        Combination::new("orange-600", "orange-50", "Orange metric secondary text"),
        Combination::new("orange-500", "orange-50", "Orange metric tertiary text"),
        Combination::new("orange-700", "orange-50", "Orange table cell text"),
        Combination::new("orange-800", "orange-100", "Orange badge in table"),
        Combination::new("yellow-700", "yellow-50", "Yellow strength badge"),
    ]
}

/// Which side of a combination a fix swaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixTarget {
    Text,
    Background,
}

/// A token swap applied to one audited usage to bring it up to AA.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContrastFix {
    pub context: &'static str,
    pub target: FixTarget,
    pub from: &'static str,
    pub to: &'static str,
}

pub const CONTRAST_FIXES: &[ContrastFix] = &[
    ContrastFix {
        context: "Blue icon text on white",
        target: FixTarget::Text,
        from: "blue-500",
        to: "blue-600",
    },
    ContrastFix {
        context: "Blue icon on blue background",
        target: FixTarget::Text,
        from: "blue-600",
        to: "blue-700",
    },
    ContrastFix {
        context: "Green icon on green background",
        target: FixTarget::Text,
        from: "green-600",
        to: "green-700",
    },
    ContrastFix {
        context: "Orange icon on orange background",
        target: FixTarget::Text,
        from: "orange-600",
        to: "orange-700",
    },
    ContrastFix {
        context: "Green button text",
        target: FixTarget::Background,
        from: "green-600",
        to: "green-700",
    },
    ContrastFix {
        context: "Orange metric secondary text",
        target: FixTarget::Text,
        from: "orange-600",
        to: "orange-700",
    },
    ContrastFix {
        context: "Orange metric tertiary text",
        target: FixTarget::Text,
        from: "orange-500",
        to: "orange-700",
    },
];

impl ContrastFix {
    fn apply(&self, combination: &mut Combination) -> bool {
        if combination.context != self.context {
            return false;
        }
        let slot = match self.target {
            FixTarget::Text => &mut combination.text,
            FixTarget::Background => &mut combination.background,
        };
        if slot.as_str() != self.from {
            return false;
        }
        *slot = self.to.to_string();
        combination.context = format!("{} (fixed from {})", self.context, self.from);
        true
    }
}

/// The built-in usages after [`CONTRAST_FIXES`] have been applied.
pub fn revised_combinations() -> Vec<Combination> {
    let mut combinations = builtin_combinations();
    for fix in CONTRAST_FIXES {
        let applied = combinations
            .iter_mut()
            .fold(false, |applied, combination| fix.apply(combination) || applied);
        if !applied {
            tracing::warn!(context = fix.context, from = fix.from, "contrast fix matched no usage");
        }
    }
    combinations
}
