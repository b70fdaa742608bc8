/// Every subcommand may be a minimal Larch application. Larch being
/// my flavor of the Elm Architecture for CLI/TUI
pub trait LarchMinimal {
    /// The initial configuration for the application, perhaps to load the persisted state.
    type Flags;
    /// The state of the application
    type Model;
    /// Something that causes an update to the model
    type Msg;
    /// The one side effect an update asks the runtime to carry out
    type Effect;
    /// How the model is translated into a view
    type View;

    fn init(flags: Self::Flags) -> Result<Self::Model, anyhow::Error>;
    /// Pure: takes the model by value and hands it back. Rejected messages
    /// return the model unchanged and report through the effect.
    fn update(msg: Self::Msg, model: Self::Model) -> (Self::Model, Self::Effect);
    fn view(model: &Self::Model) -> Self::View;
}
