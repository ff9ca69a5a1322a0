use crate::config::{Settings, SettingsStore, WindowGeometry};
use crate::domain::SelectionRect;
use crate::error::ValidationError;

/// Which screen the main window is showing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum View {
    #[default]
    Main,
    Settings,
}

/// Text of the four coordinate inputs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CoordinateFields {
    pub x: String,
    pub y: String,
    pub width: String,
    pub height: String,
}

/// Which coordinate input a message refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateField {
    X,
    Y,
    Width,
    Height,
}

impl CoordinateFields {
    pub fn from_rect(rect: SelectionRect) -> Self {
        let [x, y, width, height] = rect.fields().map(|value| value.to_string());
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn get(&self, field: CoordinateField) -> &str {
        match field {
            CoordinateField::X => &self.x,
            CoordinateField::Y => &self.y,
            CoordinateField::Width => &self.width,
            CoordinateField::Height => &self.height,
        }
    }

    pub fn set(&mut self, field: CoordinateField, value: String) {
        match field {
            CoordinateField::X => self.x = value,
            CoordinateField::Y => self.y = value,
            CoordinateField::Width => self.width = value,
            CoordinateField::Height => self.height = value,
        }
    }

    /// Parse the fields as an absolute selection
    pub fn parse(&self) -> Result<SelectionRect, ValidationError> {
        let raw = [&self.x, &self.y, &self.width, &self.height].map(|field| field.trim());
        if raw.iter().any(|field| field.is_empty()) {
            return Err(ValidationError::MissingCoordinate);
        }
        let mut values = [0i32; 4];
        for (value, field) in values.iter_mut().zip(raw) {
            *value = field.parse().map_err(|_| ValidationError::InvalidNumber)?;
        }
        let [x, y, width, height] = values;
        let width = u32::try_from(width).map_err(|_| ValidationError::NegativeExtent)?;
        let height = u32::try_from(height).map_err(|_| ValidationError::NegativeExtent)?;
        Ok(SelectionRect::absolute(x, y, width, height))
    }
}

/// Editable values preserved across view switches, never persisted
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    pub folder_name: String,
    pub coordinates: CoordinateFields,
}

/// Inputs of a freshly built main view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MainFields {
    pub folder_name: String,
    pub coordinates: CoordinateFields,
}

/// Severity of a notification line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Info,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            message: message.into(),
        }
    }
}

/// Owns the live inputs of the current view and the snapshot taken of them
#[derive(Debug, Clone, Default)]
pub struct UiStateController {
    /// Last snapshot
    state: UiState,
    /// Inputs as currently shown in the main view
    pub fields: MainFields,
    /// Active selection, from the overlay or from manual entry
    selection: Option<SelectionRect>,
}

impl UiStateController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &UiState {
        &self.state
    }

    pub fn selection(&self) -> Option<SelectionRect> {
        self.selection
    }

    /// Copy the live inputs into the snapshot and persist the window placement
    pub fn snapshot(
        &mut self,
        geometry: Option<WindowGeometry>,
        settings: &mut Settings,
        store: &SettingsStore,
    ) {
        self.state.folder_name = self.fields.folder_name.clone();
        self.state.coordinates = self.fields.coordinates.clone();
        if let Some(geometry) = geometry {
            settings.window_geometry = Some(geometry.to_string());
        }
        if let Err(err) = store.save(settings) {
            log::error!("Failed to save settings: {err}");
        }
    }

    /// Fill a freshly created main view from the last snapshot.
    ///
    /// Coordinates only come back when there is a selection they describe.
    pub fn restore(&mut self) -> &MainFields {
        self.fields.folder_name = self.state.folder_name.clone();
        self.fields.coordinates = if self.selection.is_some() {
            self.state.coordinates.clone()
        } else {
            CoordinateFields::default()
        };
        &self.fields
    }

    /// Adopt a selection produced by the overlay
    pub fn apply_selection(&mut self, rect: SelectionRect) {
        let coordinates = CoordinateFields::from_rect(rect);
        self.fields.coordinates = coordinates.clone();
        self.state.coordinates = coordinates;
        self.selection = Some(rect);
    }

    /// Adopt the manually typed coordinates, leaving the selection as is on error
    pub fn apply_manual(&mut self) -> Result<SelectionRect, ValidationError> {
        let rect = self.fields.coordinates.parse()?;
        self.state.coordinates = self.fields.coordinates.clone();
        self.selection = Some(rect);
        Ok(rect)
    }
}
