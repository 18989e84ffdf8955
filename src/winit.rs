use std::{num::NonZeroUsize, sync::Arc};

use tracing::{debug, info};
use vello::{
    AaConfig, Renderer, RendererOptions, Scene,
    peniko::Color,
    util::{RenderContext, RenderSurface},
    wgpu,
};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::{Key, NamedKey},
    platform::run_on_demand::EventLoopExtRunOnDemand,
    window::{Window, WindowId},
};

use crate::{
    chart::{Chart, ChartSink},
    error::DisplayError,
    layout::{PlotInstanceLayout, PlotLayout},
    scene::ChartPainter,
    text::Typeface,
};

/// Shows each chart in its own native window.
///
/// `render` blocks until the window is closed (close button or Escape). One
/// event loop serves every chart, so windows open one after another.
pub struct WindowSink {
    event_loop: EventLoop<()>,
    app: ChartApp,
}

impl WindowSink {
    pub fn new(layout: PlotLayout, typeface: Option<Typeface>) -> Result<Self, DisplayError> {
        let event_loop = EventLoop::new()?;
        Ok(Self {
            event_loop,
            app: ChartApp::new(layout, typeface),
        })
    }
}

impl ChartSink for WindowSink {
    type Error = DisplayError;

    fn render(&mut self, chart: &Chart) -> Result<(), DisplayError> {
        info!(title = %chart.title, "opening chart window");
        self.app.chart = Some(chart.clone());
        self.app.is_plot_outdated = true;
        let run = self.event_loop.run_app_on_demand(&mut self.app);
        let outcome = self.app.finish();
        run?;
        outcome
    }
}

struct ChartApp {
    layout: PlotLayout,
    typeface: Option<Typeface>,

    chart: Option<Chart>,
    instance: Option<PlotInstanceLayout>,
    scene: Scene,
    is_plot_outdated: bool,

    context: RenderContext,
    render_state: Option<RenderState>,
    renderers: Vec<Option<Renderer>>,

    error: Option<DisplayError>,
}

impl ChartApp {
    fn new(layout: PlotLayout, typeface: Option<Typeface>) -> Self {
        Self {
            layout,
            typeface,
            chart: None,
            instance: None,
            scene: Scene::new(),
            is_plot_outdated: true,
            context: RenderContext::new(),
            render_state: None,
            renderers: Vec::new(),
            error: None,
        }
    }

    /// Tears down the finished window and reports the first error it hit.
    fn finish(&mut self) -> Result<(), DisplayError> {
        self.render_state = None;
        self.instance = None;
        self.chart = None;
        self.scene.reset();
        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, err: DisplayError) {
        debug!(%err, "closing chart window after error");
        self.error.get_or_insert(err);
        self.render_state = None;
        event_loop.exit();
    }

    fn open_window(&mut self, event_loop: &ActiveEventLoop) -> Result<(), DisplayError> {
        let Some(chart) = &self.chart else {
            return Ok(());
        };

        let window = Arc::new(
            event_loop.create_window(
                Window::default_attributes()
                    .with_inner_size(LogicalSize::new(self.layout.width, self.layout.height))
                    .with_resizable(true)
                    .with_title(chart.title.clone()),
            )?,
        );
        let size = window.inner_size();
        let present_mode = wgpu::PresentMode::AutoVsync;
        let surface_future =
            self.context
                .create_surface(window.clone(), size.width, size.height, present_mode);
        let surface = pollster::block_on(surface_future).map_err(|e| DisplayError::Surface {
            reason: e.to_string(),
        })?;

        self.renderers.resize_with(self.context.devices.len(), || None);

        let id = surface.dev_id;
        if self.renderers[id].is_none() {
            let device_handle = &self.context.devices[id];
            let renderer = Renderer::new(
                &device_handle.device,
                RendererOptions {
                    use_cpu: false,
                    antialiasing_support: [AaConfig::Area].iter().copied().collect(),
                    num_init_threads: NonZeroUsize::new(1),
                    pipeline_cache: None,
                },
            )
            .map_err(|e| DisplayError::Renderer {
                reason: e.to_string(),
            })?;
            self.renderers[id] = Some(renderer);
        }

        let mut instance = self
            .layout
            .instantiate(window.scale_factor(), chart.data_bounds());
        instance.resize(size.width, size.height);
        debug!(
            width = size.width,
            height = size.height,
            scale_factor = instance.scale_factor,
            "chart window created"
        );

        self.instance = Some(instance);
        self.is_plot_outdated = true;
        window.request_redraw();
        self.render_state = Some(RenderState { surface, window });
        Ok(())
    }

    fn redraw(&mut self) -> Result<(), DisplayError> {
        let (Some(RenderState { surface, window }), Some(chart), Some(instance)) =
            (&self.render_state, &self.chart, &self.instance)
        else {
            return Ok(());
        };

        if self.is_plot_outdated {
            self.scene = ChartPainter {
                chart,
                layout: instance,
                typeface: self.typeface.as_ref(),
            }
            .paint();
            self.is_plot_outdated = false;
        }

        let dev_id = surface.dev_id;
        let device_handle = self
            .context
            .devices
            .get(dev_id)
            .ok_or(DisplayError::NoDevice { dev_id })?;
        let renderer = self
            .renderers
            .get_mut(dev_id)
            .and_then(Option::as_mut)
            .ok_or(DisplayError::NoDevice { dev_id })?;

        let render_params = vello::RenderParams {
            base_color: Color::WHITE,
            width: surface.config.width,
            height: surface.config.height,
            antialiasing_method: AaConfig::Area,
        };
        let render_err = |e: &dyn std::fmt::Display| DisplayError::Render {
            reason: e.to_string(),
        };

        renderer
            .render_to_texture(
                &device_handle.device,
                &device_handle.queue,
                &self.scene,
                &surface.target_view,
                &render_params,
            )
            .map_err(|e| render_err(&e))?;

        let surface_texture = surface
            .surface
            .get_current_texture()
            .map_err(|e| render_err(&e))?;
        let mut encoder =
            device_handle
                .device
                .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                    label: Some("Surface Blit"),
                });
        surface.blitter.copy(
            &device_handle.device,
            &mut encoder,
            &surface.target_view,
            &surface_texture
                .texture
                .create_view(&wgpu::TextureViewDescriptor::default()),
        );
        device_handle.queue.submit([encoder.finish()]);
        window.pre_present_notify();
        surface_texture.present();

        device_handle
            .device
            .poll(wgpu::PollType::Poll)
            .map_err(|e| render_err(&e))?;
        Ok(())
    }
}

impl ApplicationHandler for ChartApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.render_state.is_some() {
            return;
        }
        if let Err(err) = self.open_window(event_loop) {
            self.fail(event_loop, err);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let Some(render_state) = &mut self.render_state else {
            return;
        };
        if render_state.window.id() != window_id {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                self.render_state = None;
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } if event.state == ElementState::Pressed => {
                if let Key::Named(NamedKey::Escape) = event.logical_key.as_ref() {
                    self.render_state = None;
                    event_loop.exit();
                }
            }
            WindowEvent::Resized(size) => {
                let RenderState { surface, window } = render_state;
                self.context.resize_surface(surface, size.width, size.height);
                if let Some(instance) = &mut self.instance {
                    instance.resize(size.width, size.height);
                }
                self.is_plot_outdated = true;
                window.request_redraw();
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(instance) = &mut self.instance {
                    instance.scale_factor = scale_factor;
                }
                self.is_plot_outdated = true;
                render_state.window.request_redraw();
            }
            WindowEvent::RedrawRequested => {
                if let Err(err) = self.redraw() {
                    self.fail(event_loop, err);
                }
            }
            _ => {}
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.render_state = None;
    }
}

// surface is declared first so it drops before its window
struct RenderState {
    surface: RenderSurface<'static>,
    window: Arc<Window>,
}
